use crate::errors::AppError;
use crate::events::EventCatalog;
use crate::helper_methods::get_with_retry;
use app_config::APP_CONFIG;
use std::time::Duration;
use url::Url;

pub mod leaderboard;

pub use leaderboard::{LeaderboardResponse, PlayerSnapshotRow};

const EVENT_CATALOG_ROUTE: &str = "events/all.5.json";
const LEADERBOARD_ROUTE: &str = "eventtop/data";

/// Client for the Bestdori public API.
#[derive(Debug, Clone)]
pub struct BestdoriClient {
  client: reqwest::Client,
}

impl BestdoriClient {
  pub fn new() -> Self {
    // Same panic behavior as `reqwest::Client::new()` on a broken TLS backend.
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(APP_CONFIG.request_timeout_seconds()))
      .build()
      .unwrap();

    Self { client }
  }

  /// Fetches the catalog of all events, keyed by event ID.
  pub async fn fetch_event_catalog(&self) -> Result<EventCatalog, AppError> {
    let query_url = Url::parse(&format!(
      "{}/{}",
      APP_CONFIG.api_base_url(),
      EVENT_CATALOG_ROUTE
    ))?;

    let response = get_with_retry(
      self.client.get(query_url),
      APP_CONFIG.request_retry_count(),
      Duration::from_secs(APP_CONFIG.request_retry_wait_seconds()),
    )
    .await?;

    response.json::<EventCatalog>().await.map_err(Into::into)
  }

  /// Fetches the latest top-10 leaderboard for an event and merges the user
  /// and point records into snapshot rows.
  pub async fn fetch_leaderboard(
    &self,
    server: usize,
    event_id: i64,
  ) -> Result<Vec<PlayerSnapshotRow>, AppError> {
    let mut query_url = Url::parse(&format!(
      "{}/{}",
      APP_CONFIG.api_base_url(),
      LEADERBOARD_ROUTE
    ))?;

    query_url
      .query_pairs_mut()
      .append_pair("server", &server.to_string())
      .append_pair("event", &event_id.to_string())
      .append_pair("mid", "0")
      .append_pair("latest", "1");

    let response = get_with_retry(
      self.client.get(query_url),
      APP_CONFIG.request_retry_count(),
      Duration::from_secs(APP_CONFIG.request_retry_wait_seconds()),
    )
    .await?;

    let leaderboard = response.json::<LeaderboardResponse>().await?;

    Ok(leaderboard.into_snapshot_rows())
  }
}

impl Default for BestdoriClient {
  fn default() -> Self {
    Self::new()
  }
}
