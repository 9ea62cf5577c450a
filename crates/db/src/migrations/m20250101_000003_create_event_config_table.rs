//! Create event_config table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventConfig::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventConfig::WatchitUuid)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(EventConfig::DefaultPollsConfigId).uuid())
                    .col(ColumnDef::new(EventConfig::DefaultQuestionsConfigId).uuid())
                    .col(
                        ColumnDef::new(EventConfig::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(EventConfig::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_config_default_polls_config")
                            .from(EventConfig::Table, EventConfig::DefaultPollsConfigId)
                            .to(PollConfig::Table, PollConfig::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_config_default_questions_config")
                            .from(EventConfig::Table, EventConfig::DefaultQuestionsConfigId)
                            .to(QuestionConfig::Table, QuestionConfig::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventConfig::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EventConfig {
    Table,
    Id,
    WatchitUuid,
    DefaultPollsConfigId,
    DefaultQuestionsConfigId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PollConfig {
    Table,
    Id,
}

#[derive(Iden)]
enum QuestionConfig {
    Table,
    Id,
}
