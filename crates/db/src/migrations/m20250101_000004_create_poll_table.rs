//! Create poll table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poll::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Poll::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Poll::WatchitUuid).string_len(64).not_null())
                    .col(ColumnDef::new(Poll::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Poll::Choices).json().not_null())
                    .col(ColumnDef::new(Poll::PollConfigId).uuid())
                    .col(
                        ColumnDef::new(Poll::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_poll_config")
                            .from(Poll::Table, Poll::PollConfigId)
                            .to(PollConfig::Table, PollConfig::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on watchit_uuid for per-event listings
        manager
            .create_index(
                Index::create()
                    .name("idx_poll_watchit_uuid")
                    .table(Poll::Table)
                    .col(Poll::WatchitUuid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Poll::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Poll {
    Table,
    Id,
    WatchitUuid,
    Title,
    Choices,
    PollConfigId,
    CreatedAt,
}

#[derive(Iden)]
enum PollConfig {
    Table,
    Id,
}
