#[derive(Debug, thiserror::Error)]
pub enum EntityExtensionError {
  #[error("{}", .0)]
  SeaOrmDbError(#[from] sea_orm::error::DbErr),

  #[error("Failed to get {} at {}. {}", value_name, location, additional_data)]
  FailedToGetValue {
    value_name: &'static str,
    location: &'static str,
    additional_data: String,
  },
}
