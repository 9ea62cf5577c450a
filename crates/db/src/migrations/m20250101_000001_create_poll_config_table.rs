//! Create poll_config table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PollConfig::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PollConfig::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(PollConfig::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PollConfig::AllowMultipleChoices)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PollConfig::ShowResults)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PollConfig::AnonymousVotes)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PollConfig::DurationSeconds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PollConfig::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(PollConfig::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PollConfig::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PollConfig {
    Table,
    Id,
    Enabled,
    AllowMultipleChoices,
    ShowResults,
    AnonymousVotes,
    DurationSeconds,
    CreatedAt,
    UpdatedAt,
}
