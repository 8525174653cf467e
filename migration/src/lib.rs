pub use sea_orm_migration::prelude::*;

mod m20250712_100645_event_snapshot_table;
mod m20250712_101032_reference_player_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20250712_100645_event_snapshot_table::Migration),
      Box::new(m20250712_101032_reference_player_table::Migration),
    ]
  }
}
