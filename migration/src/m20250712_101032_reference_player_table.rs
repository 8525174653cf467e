use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ReferencePlayer::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ReferencePlayer::Id)
              .integer()
              .not_null()
              .primary_key()
              .auto_increment(),
          )
          .col(
            ColumnDef::new(ReferencePlayer::GuildId)
              .big_integer()
              .not_null()
              .unique_key(),
          )
          .col(
            ColumnDef::new(ReferencePlayer::UserId)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(ReferencePlayer::PlayerName)
              .string()
              .not_null(),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ReferencePlayer::Table).to_owned())
      .await
  }
}

#[derive(Iden)]
pub enum ReferencePlayer {
  Table,
  Id,
  GuildId,
  UserId,
  PlayerName,
}
