//! Create question_config table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuestionConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionConfig::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionConfig::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(QuestionConfig::AllowAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QuestionConfig::RequiresModeration)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QuestionConfig::AllowUpvotes)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(QuestionConfig::MaxLength)
                            .integer()
                            .not_null()
                            .default(280),
                    )
                    .col(
                        ColumnDef::new(QuestionConfig::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(QuestionConfig::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuestionConfig::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum QuestionConfig {
    Table,
    Id,
    Enabled,
    AllowAnonymous,
    RequiresModeration,
    AllowUpvotes,
    MaxLength,
    CreatedAt,
    UpdatedAt,
}
