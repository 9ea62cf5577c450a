//! Poll config repository.

use std::sync::Arc;

use crate::entities::{PollConfig, poll_config};
use watchit_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Poll config repository for database operations.
#[derive(Clone)]
pub struct PollConfigRepository {
    db: Arc<DatabaseConnection>,
}

impl PollConfigRepository {
    /// Create a new poll config repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a poll config by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<poll_config::Model>> {
        PollConfig::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new poll config.
    pub async fn create(&self, model: poll_config::ActiveModel) -> AppResult<poll_config::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a poll config.
    pub async fn update(&self, model: poll_config::ActiveModel) -> AppResult<poll_config::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a poll config.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        PollConfig::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
