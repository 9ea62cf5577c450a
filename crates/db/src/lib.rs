//! Database layer for watchit-polls.
//!
//! Entities, repositories and migrations for event, poll and question
//! configuration.

pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod test_utils;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, log::LevelFilter};
use watchit_common::{AppError, config::DatabaseConfig};

/// Open the connection pool described by `config`.
pub async fn init(config: &DatabaseConfig) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.url);

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connected to database"
    );
    Ok(db)
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}
