use crate::errors::EntityExtensionError;
use entities::reference_player;
use sea_orm::*;

pub trait ReferencePlayerExtensions {
  /// Registers the reference player for a guild, replacing any existing one.
  async fn set_reference(
    guild_id: i64,
    user_id: i64,
    player_name: &str,
    database_connection: &DatabaseConnection,
  ) -> Result<reference_player::Model, EntityExtensionError>;

  /// An unset reference is a valid state and comes back as `None`.
  async fn get_reference(
    guild_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<Option<reference_player::Model>, EntityExtensionError>;

  async fn delete_reference(
    guild_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<(), EntityExtensionError>;
}

impl ReferencePlayerExtensions for reference_player::Model {
  async fn set_reference(
    guild_id: i64,
    user_id: i64,
    player_name: &str,
    database_connection: &DatabaseConnection,
  ) -> Result<reference_player::Model, EntityExtensionError> {
    let existing_reference = reference_player::Entity::find()
      .filter(reference_player::Column::GuildId.eq(guild_id))
      .one(database_connection)
      .await?;

    if let Some(existing_reference) = existing_reference {
      let mut active_model = existing_reference.into_active_model();

      active_model.user_id = ActiveValue::Set(user_id);
      active_model.player_name = ActiveValue::Set(player_name.to_string());

      return active_model
        .update(database_connection)
        .await
        .map_err(Into::into);
    }

    let active_model = reference_player::ActiveModel {
      guild_id: ActiveValue::Set(guild_id),
      user_id: ActiveValue::Set(user_id),
      player_name: ActiveValue::Set(player_name.to_string()),
      ..Default::default()
    };

    active_model
      .insert(database_connection)
      .await
      .map_err(Into::into)
  }

  async fn get_reference(
    guild_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<Option<reference_player::Model>, EntityExtensionError> {
    reference_player::Entity::find()
      .filter(reference_player::Column::GuildId.eq(guild_id))
      .one(database_connection)
      .await
      .map_err(Into::into)
  }

  async fn delete_reference(
    guild_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<(), EntityExtensionError> {
    reference_player::Entity::delete_many()
      .filter(reference_player::Column::GuildId.eq(guild_id))
      .exec(database_connection)
      .await?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use migration::MigratorTrait;

  async fn test_database() -> DatabaseConnection {
    // A pooled in-memory sqlite database only exists on the connection that
    // created it, so the pool is pinned to a single connection.
    let mut connect_options = ConnectOptions::new("sqlite::memory:");
    connect_options.max_connections(1);

    let database_connection = Database::connect(connect_options).await.unwrap();

    migration::Migrator::up(&database_connection, None)
      .await
      .unwrap();

    database_connection
  }

  #[tokio::test]
  async fn set_reference_then_get_reference_returns_the_registered_player() {
    let database_connection = test_database().await;

    reference_player::Model::set_reference(10, 12345, "kasumi", &database_connection)
      .await
      .unwrap();

    let reference = reference_player::Model::get_reference(10, &database_connection)
      .await
      .unwrap()
      .unwrap();

    assert_eq!(reference.guild_id, 10);
    assert_eq!(reference.user_id, 12345);
    assert_eq!(reference.player_name, "kasumi");
  }

  #[tokio::test]
  async fn set_reference_replaces_the_existing_registration() {
    let database_connection = test_database().await;

    reference_player::Model::set_reference(10, 12345, "kasumi", &database_connection)
      .await
      .unwrap();
    reference_player::Model::set_reference(10, 67890, "arisa", &database_connection)
      .await
      .unwrap();

    let reference = reference_player::Model::get_reference(10, &database_connection)
      .await
      .unwrap()
      .unwrap();
    let total_references = reference_player::Entity::find()
      .all(&database_connection)
      .await
      .unwrap()
      .len();

    assert_eq!(reference.user_id, 67890);
    assert_eq!(reference.player_name, "arisa");
    assert_eq!(total_references, 1);
  }

  #[tokio::test]
  async fn references_are_scoped_per_guild() {
    let database_connection = test_database().await;

    reference_player::Model::set_reference(10, 12345, "kasumi", &database_connection)
      .await
      .unwrap();
    reference_player::Model::set_reference(20, 67890, "arisa", &database_connection)
      .await
      .unwrap();

    let first_reference = reference_player::Model::get_reference(10, &database_connection)
      .await
      .unwrap()
      .unwrap();
    let second_reference = reference_player::Model::get_reference(20, &database_connection)
      .await
      .unwrap()
      .unwrap();

    assert_eq!(first_reference.user_id, 12345);
    assert_eq!(second_reference.user_id, 67890);
  }

  #[tokio::test]
  async fn delete_reference_leaves_the_guild_unset() {
    let database_connection = test_database().await;

    reference_player::Model::set_reference(10, 12345, "kasumi", &database_connection)
      .await
      .unwrap();
    reference_player::Model::delete_reference(10, &database_connection)
      .await
      .unwrap();

    let reference = reference_player::Model::get_reference(10, &database_connection)
      .await
      .unwrap();

    assert!(reference.is_none());
  }

  #[tokio::test]
  async fn deleting_an_unset_reference_is_not_an_error() {
    let database_connection = test_database().await;

    reference_player::Model::delete_reference(10, &database_connection)
      .await
      .unwrap();
  }
}
