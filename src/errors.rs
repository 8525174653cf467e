#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("{}", .0)]
  UrlParseError(#[from] url::ParseError),

  #[error("{}", .0)]
  ReqwestError(#[from] reqwest::Error),

  #[error("{}", .0)]
  SerdeError(#[from] serde_json::Error),

  #[error(
    "Failed to get a response from {} after {} attempts.",
    request,
    attempts
  )]
  RanOutOfGetRequestAttempts { request: String, attempts: usize },

  #[error("Attempted to repeat a GET request for a request that could not be cloned. Request: `{}`", .0)]
  RequestCouldNotBeCloned(String),

  #[error("{}", .0)]
  SeaOrmDbError(#[from] sea_orm::error::DbErr),

  #[error("{}", .0)]
  EntityExtensionError(#[from] entity_extensions::errors::EntityExtensionError),

  #[error("No event is currently running on server {}.", .0)]
  NoCurrentEvent(usize),

  #[error("Event {} was not found in the event catalog.", .0)]
  EventNotInCatalog(i64),

  #[error(
    "A tracking task is already running for guild {} at the {} cadence.",
    guild_id,
    cadence
  )]
  TaskAlreadyRunning { guild_id: i64, cadence: String },

  #[error(
    "No tracking task is running for guild {} at the {} cadence.",
    guild_id,
    cadence
  )]
  TaskNotRunning { guild_id: i64, cadence: String },

  #[error("Unknown cadence value: {:?}. Expected \"hourly\" or \"two-minutes\".", .0)]
  UnknownCadence(String),
}
