use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(EventSnapshot::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(EventSnapshot::Id)
              .integer()
              .not_null()
              .primary_key()
              .auto_increment(),
          )
          .col(ColumnDef::new(EventSnapshot::Rank).integer().not_null())
          .col(
            ColumnDef::new(EventSnapshot::PlayerName)
              .string()
              .not_null(),
          )
          .col(
            ColumnDef::new(EventSnapshot::UserId)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(EventSnapshot::PreviousPoints)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(EventSnapshot::Points)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(EventSnapshot::Speed)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(EventSnapshot::EventId)
              .big_integer()
              .not_null(),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_event_snapshot_event_id_user_id")
          .table(EventSnapshot::Table)
          .col(EventSnapshot::EventId)
          .col(EventSnapshot::UserId)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(EventSnapshot::Table).to_owned())
      .await
  }
}

#[derive(Iden)]
pub enum EventSnapshot {
  Table,
  Id,
  Rank,
  PlayerName,
  UserId,
  PreviousPoints,
  Points,
  Speed,
  EventId,
}
