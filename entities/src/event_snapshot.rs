use sea_orm::entity::prelude::*;

/// One player's leaderboard state for one event, as of the latest poll.
///
/// A poll cycle overwrites the row for its `(event_id, user_id)` pair, so only
/// the most recent snapshot per player per event is ever stored.
#[derive(
  Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize,
)]
#[sea_orm(table_name = "event_snapshot")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub rank: i32,
  pub player_name: String,
  pub user_id: i64,
  pub previous_points: i64,
  pub points: i64,
  pub speed: i64,
  pub event_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
