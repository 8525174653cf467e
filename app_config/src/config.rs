use crate::log_level_wrapper::*;
use crate::rolling_appender_rotation::*;
use lazy_static::lazy_static;
use schematic::{Config, ConfigLoader};
use std::path::PathBuf;

const CONFIG_PATH_ENV_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_FILEPATH: &str = "./config/config.yml";

lazy_static! {
  pub static ref APP_CONFIG: AppConfig = AppConfig::new().unwrap();
}

#[derive(Debug, Config, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
  /// Logging is disabled entirely when no level is configured.
  log_level: Option<LoggingConfigLevel>,
  /// Logs go to stdout when no directory is configured.
  logging_dir: Option<PathBuf>,
  #[setting(default = "t10_tracker")]
  logging_filename_prefix: String,
  #[setting(default = "daily")]
  logging_roll_appender: RollingAppenderRotation,

  #[setting(default = "./data/db/t10_tracker.db", env = "DATABASE_PATH")]
  database_path: PathBuf,

  #[setting(default = "https://bestdori.com/api", env = "BESTDORI_API_URL")]
  api_base_url: String,

  #[setting(default = 5)]
  request_retry_count: usize,
  #[setting(default = 1)]
  request_retry_wait_seconds: u64,
  #[setting(default = 10)]
  request_timeout_seconds: u64,
}

impl AppConfig {
  fn new() -> anyhow::Result<Self> {
    let config = ConfigLoader::<AppConfig>::new()
      .file_optional(get_config_path())
      .unwrap()
      .load()?
      .config;

    Ok(config)
  }

  pub fn log_level(&self) -> Option<&LoggingConfigLevel> {
    self.log_level.as_ref()
  }

  pub fn logging_dir(&self) -> Option<&PathBuf> {
    self.logging_dir.as_ref()
  }

  pub fn logging_filename_prefix(&self) -> &str {
    &self.logging_filename_prefix
  }

  pub fn logging_file_roll_appender(&self) -> &RollingAppenderRotation {
    &self.logging_roll_appender
  }

  pub fn database_path(&self) -> &PathBuf {
    &self.database_path
  }

  pub fn api_base_url(&self) -> &str {
    self.api_base_url.trim_end_matches('/')
  }

  pub fn request_retry_count(&self) -> usize {
    self.request_retry_count
  }

  pub fn request_retry_wait_seconds(&self) -> u64 {
    self.request_retry_wait_seconds
  }

  pub fn request_timeout_seconds(&self) -> u64 {
    self.request_timeout_seconds
  }
}

fn get_config_path() -> PathBuf {
  let Some((_, config_path)) = std::env::vars().find(|(key, _)| key == CONFIG_PATH_ENV_VAR) else {
    return PathBuf::from(DEFAULT_CONFIG_FILEPATH);
  };

  PathBuf::from(config_path)
}
