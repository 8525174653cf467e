use crate::errors::EntityExtensionError;
use entities::event_snapshot;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashMap;

/// The persisted subset of a ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotWrite {
  pub rank: i32,
  pub player_name: String,
  pub user_id: i64,
  pub previous_points: i64,
  pub points: i64,
  pub speed: i64,
}

pub trait EventSnapshotExtensions {
  /// Returns the most recently stored points for every player with a row for
  /// the given event, keyed by user ID.
  ///
  /// A player with no stored row is simply absent from the map.
  async fn load_previous_points(
    event_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<HashMap<i64, i64>, EntityExtensionError>;

  /// Upserts one row per entry for the given event, keyed `(event_id, user_id)`.
  ///
  /// Runs inside a single transaction. A concurrent reader sees either the
  /// fully-old or fully-new row set.
  async fn save_cycle(
    rows: Vec<SnapshotWrite>,
    event_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<(), EntityExtensionError>;
}

impl EventSnapshotExtensions for event_snapshot::Model {
  async fn load_previous_points(
    event_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<HashMap<i64, i64>, EntityExtensionError> {
    let stored_rows = event_snapshot::Entity::find()
      .filter(event_snapshot::Column::EventId.eq(event_id))
      .all(database_connection)
      .await?;

    Ok(
      stored_rows
        .into_iter()
        .map(|row| (row.user_id, row.points))
        .collect(),
    )
  }

  async fn save_cycle(
    rows: Vec<SnapshotWrite>,
    event_id: i64,
    database_connection: &DatabaseConnection,
  ) -> Result<(), EntityExtensionError> {
    if rows.is_empty() {
      return Ok(());
    }

    let active_models = rows.into_iter().map(|row| event_snapshot::ActiveModel {
      rank: ActiveValue::Set(row.rank),
      player_name: ActiveValue::Set(row.player_name),
      user_id: ActiveValue::Set(row.user_id),
      previous_points: ActiveValue::Set(row.previous_points),
      points: ActiveValue::Set(row.points),
      speed: ActiveValue::Set(row.speed),
      event_id: ActiveValue::Set(event_id),
      ..Default::default()
    });

    let transaction = database_connection.begin().await?;

    event_snapshot::Entity::insert_many(active_models)
      .on_conflict(
        OnConflict::columns([
          event_snapshot::Column::EventId,
          event_snapshot::Column::UserId,
        ])
        .update_columns([
          event_snapshot::Column::Rank,
          event_snapshot::Column::PlayerName,
          event_snapshot::Column::PreviousPoints,
          event_snapshot::Column::Points,
          event_snapshot::Column::Speed,
        ])
        .to_owned(),
      )
      .exec(&transaction)
      .await?;

    transaction.commit().await?;

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

  fn snapshot_write(user_id: i64, points: i64) -> SnapshotWrite {
    SnapshotWrite {
      rank: 1,
      player_name: format!("player_{}", user_id),
      user_id,
      previous_points: 0,
      points,
      speed: 0,
    }
  }

  #[tokio::test]
  async fn save_cycle_then_load_previous_points_round_trips_exactly() {
    let database_connection = test_database().await;
    let rows = vec![
      snapshot_write(1, 1500),
      snapshot_write(2, 900),
      snapshot_write(3, 450),
    ];

    event_snapshot::Model::save_cycle(rows, 100, &database_connection)
      .await
      .unwrap();

    let previous_points = event_snapshot::Model::load_previous_points(100, &database_connection)
      .await
      .unwrap();

    assert_eq!(
      previous_points,
      HashMap::from([(1, 1500), (2, 900), (3, 450)])
    );
  }

  #[tokio::test]
  async fn save_cycle_overwrites_the_prior_row_for_the_same_player() {
    let database_connection = test_database().await;

    event_snapshot::Model::save_cycle(vec![snapshot_write(1, 1000)], 100, &database_connection)
      .await
      .unwrap();
    event_snapshot::Model::save_cycle(vec![snapshot_write(1, 1500)], 100, &database_connection)
      .await
      .unwrap();

    let previous_points = event_snapshot::Model::load_previous_points(100, &database_connection)
      .await
      .unwrap();
    let stored_row_count = event_snapshot::Entity::find()
      .all(&database_connection)
      .await
      .unwrap()
      .len();

    assert_eq!(previous_points, HashMap::from([(1, 1500)]));
    assert_eq!(stored_row_count, 1);
  }

  #[tokio::test]
  async fn load_previous_points_is_scoped_to_the_requested_event() {
    let database_connection = test_database().await;

    event_snapshot::Model::save_cycle(vec![snapshot_write(1, 1000)], 100, &database_connection)
      .await
      .unwrap();
    event_snapshot::Model::save_cycle(vec![snapshot_write(1, 9999)], 101, &database_connection)
      .await
      .unwrap();

    let previous_points = event_snapshot::Model::load_previous_points(100, &database_connection)
      .await
      .unwrap();

    assert_eq!(previous_points, HashMap::from([(1, 1000)]));
  }

  #[tokio::test]
  async fn save_cycle_with_no_rows_stores_nothing() {
    let database_connection = test_database().await;

    event_snapshot::Model::save_cycle(vec![], 100, &database_connection)
      .await
      .unwrap();

    let previous_points = event_snapshot::Model::load_previous_points(100, &database_connection)
      .await
      .unwrap();

    assert!(previous_points.is_empty());
  }
}
