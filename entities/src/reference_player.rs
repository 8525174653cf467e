use sea_orm::entity::prelude::*;

/// The player a guild compares every leaderboard row against.
///
/// At most one row exists per guild; re-registration overwrites it.
#[derive(
  Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize,
)]
#[sea_orm(table_name = "reference_player")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub guild_id: i64,
  pub user_id: i64,
  pub player_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
