//! Poll service.

use tracing::debug;
use watchit_common::{AppError, AppResult};
use watchit_db::{entities::poll, repositories::PollRepository};

use super::event_config::EventConfigService;

/// Field key for poll lookup errors.
pub const POLL_ID_FIELD: &str = "poll_id";

/// Read access to poll instances.
#[derive(Clone)]
pub struct PollService {
    events: EventConfigService,
    poll_repo: PollRepository,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(events: EventConfigService, poll_repo: PollRepository) -> Self {
        Self { events, poll_repo }
    }

    /// Get a poll by its integer id.
    pub async fn get(&self, watchit_uuid: &str, poll_id: &str) -> AppResult<poll::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;

        let Ok(id) = poll_id.parse::<i32>() else {
            debug!(poll_id, "Malformed poll id");
            return Err(poll_not_found());
        };

        self.poll_repo.find_by_id(id).await?.ok_or_else(poll_not_found)
    }
}

fn poll_not_found() -> AppError {
    AppError::field(POLL_ID_FIELD, "poll not found")
}
