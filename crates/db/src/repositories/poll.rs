//! Poll repository.

use std::sync::Arc;

use crate::entities::{Poll, poll};
use watchit_common::{AppError, AppResult};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Poll repository for database operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<poll::Model>> {
        Poll::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
