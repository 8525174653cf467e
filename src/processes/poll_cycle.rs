use crate::api::BestdoriClient;
use crate::errors::AppError;
use crate::metrics::calculate_rankings;
use crate::render::{assemble_table, TableSpec};
use chrono::{Local, Utc};
use database_connection::get_database_connection;
use entities::{event_snapshot, reference_player};
use entity_extensions::prelude::*;

/// Runs one full tracking cycle for a guild.
///
/// `Ok(None)` means the cycle produced nothing to render (no current event,
/// fetch retries exhausted, or an empty leaderboard) and was skipped; the
/// reason is logged. Storage failures are returned as errors and abort the
/// cycle before any snapshot row is written.
///
/// An explicit event ID of 0 (or none at all) resolves the current event for
/// the server.
pub async fn run_tracking_cycle(
  server: usize,
  guild_id: i64,
  explicit_event_id: Option<i64>,
) -> Result<Option<TableSpec>, AppError> {
  let client = BestdoriClient::new();

  let catalog = match client.fetch_event_catalog().await {
    Ok(catalog) => catalog,
    Err(error) => {
      tracing::error!("Failed to fetch the event catalog: {}", error);

      return Ok(None);
    }
  };

  let event_id = match explicit_event_id.filter(|&event_id| event_id != 0) {
    Some(event_id) => event_id,
    None => {
      let now_millis = Utc::now().timestamp_millis() as f64;

      match catalog.current_event_id(server, now_millis) {
        Some(event_id) => event_id,
        None => {
          tracing::warn!("No event is currently running on server {}.", server);

          return Ok(None);
        }
      }
    }
  };

  let database_connection = get_database_connection().await;
  let previous_points =
    event_snapshot::Model::load_previous_points(event_id, database_connection).await?;

  let snapshot_rows = match client.fetch_leaderboard(server, event_id).await {
    Ok(snapshot_rows) => snapshot_rows,
    Err(error) => {
      tracing::error!(
        "Failed to fetch the leaderboard for event {}: {}",
        event_id,
        error
      );

      return Ok(None);
    }
  };

  if snapshot_rows.is_empty() {
    tracing::warn!(
      "The leaderboard for event {} came back empty. Skipping this cycle.",
      event_id
    );

    return Ok(None);
  }

  let reference =
    reference_player::Model::get_reference(guild_id, database_connection).await?;
  let reference_user_id = reference.as_ref().map(|reference| reference.user_id);

  let entries = calculate_rankings(snapshot_rows, &previous_points, reference_user_id);

  let progress = catalog.event_progress(event_id, Utc::now());

  if progress.is_none() {
    tracing::warn!(
      "Event {} is missing from the catalog. Rendering with unknown progress.",
      event_id
    );
  }

  let table = assemble_table(
    entries.clone(),
    reference.as_ref().map(|reference| reference.player_name.as_str()),
    progress.as_ref(),
    Local::now(),
  );

  let writes = entries
    .into_iter()
    .map(|entry| SnapshotWrite {
      rank: entry.rank as i32,
      player_name: entry.player_name,
      user_id: entry.user_id,
      previous_points: entry.previous_points,
      points: entry.points,
      speed: entry.speed,
    })
    .collect();

  event_snapshot::Model::save_cycle(writes, event_id, database_connection).await?;

  Ok(Some(table))
}
