//! Event config repository.

use std::sync::Arc;

use crate::entities::{EventConfig, event_config};
use watchit_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Event config repository for database operations.
#[derive(Clone)]
pub struct EventConfigRepository {
    db: Arc<DatabaseConnection>,
}

impl EventConfigRepository {
    /// Create a new event config repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the config row for a watchit.
    pub async fn find_by_watchit_uuid(
        &self,
        watchit_uuid: &str,
    ) -> AppResult<Option<event_config::Model>> {
        EventConfig::find()
            .filter(event_config::Column::WatchitUuid.eq(watchit_uuid))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new event config.
    pub async fn create(
        &self,
        model: event_config::ActiveModel,
    ) -> AppResult<event_config::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an event config.
    pub async fn update(
        &self,
        model: event_config::ActiveModel,
    ) -> AppResult<event_config::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
