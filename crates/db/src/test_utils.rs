//! Test utilities for database operations.
//!
//! Connects to a disposable `PostgreSQL` database, applies migrations and
//! wipes the configuration tables between tests.

use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use tracing::info;

/// Tables owned by this service, children first.
const TABLES: [&str; 4] = ["poll", "event_config", "poll_config", "question_config"];

/// Test database configuration.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Database name.
    pub database: String,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("TEST_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("TEST_DB_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5433),
            username: std::env::var("TEST_DB_USER").unwrap_or_else(|_| "watchit_test".to_string()),
            password: std::env::var("TEST_DB_PASSWORD")
                .unwrap_or_else(|_| "watchit_test".to_string()),
            database: std::env::var("TEST_DB_NAME").unwrap_or_else(|_| "watchit_test".to_string()),
        }
    }
}

impl TestDbConfig {
    /// Get the database URL.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

/// A migrated test database.
pub struct TestDatabase {
    /// Database connection.
    pub conn: DatabaseConnection,
    /// Database configuration.
    pub config: TestDbConfig,
}

impl TestDatabase {
    /// Connect using `TEST_DB_*` environment variables and migrate.
    pub async fn new() -> Result<Self, DbErr> {
        Self::with_config(TestDbConfig::default()).await
    }

    /// Connect with a custom configuration and migrate.
    pub async fn with_config(config: TestDbConfig) -> Result<Self, DbErr> {
        use sea_orm_migration::MigratorTrait;

        let conn = Database::connect(&config.database_url()).await?;
        crate::migrations::Migrator::up(&conn, None).await?;

        info!(database = %config.database, "Connected to test database");

        Ok(Self { conn, config })
    }

    /// Get the database connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Remove every row from the service's tables.
    pub async fn cleanup(&self) -> Result<(), DbErr> {
        for table in TABLES {
            let truncate = format!("TRUNCATE TABLE \"{table}\" CASCADE");
            self.conn
                .execute(Statement::from_string(DatabaseBackend::Postgres, truncate))
                .await?;
        }

        info!("Cleaned up test database");
        Ok(())
    }
}
