//! Question config repository.

use std::sync::Arc;

use crate::entities::{QuestionConfig, question_config};
use watchit_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Question config repository for database operations.
#[derive(Clone)]
pub struct QuestionConfigRepository {
    db: Arc<DatabaseConnection>,
}

impl QuestionConfigRepository {
    /// Create a new question config repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a question config by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<question_config::Model>> {
        QuestionConfig::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new question config.
    pub async fn create(&self, model: question_config::ActiveModel) -> AppResult<question_config::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a question config.
    pub async fn update(&self, model: question_config::ActiveModel) -> AppResult<question_config::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a question config.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        QuestionConfig::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
