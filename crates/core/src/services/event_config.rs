//! Event config service.
//!
//! Shared steps of every configuration handler: checking the watchit against
//! the upstream directory and resolving the event's config row.

use chrono::Utc;
use sea_orm::Set;
use tracing::{debug, info, warn};
use uuid::Uuid;
use watchit_common::{AppError, AppResult, IdGenerator};
use watchit_db::entities::event_config;
use watchit_db::repositories::EventConfigRepository;

use super::watchit::WatchitDirectoryService;

/// Field key for watchit-scoped errors.
pub const WATCHIT_UUID_FIELD: &str = "watchit_uuid";

const WATCHIT_NOT_FOUND: &str = "watchit not found";
const EVENT_CONFIG_NOT_FOUND: &str = "event config not found";

/// Service for event-level configuration.
#[derive(Clone)]
pub struct EventConfigService {
    directory: WatchitDirectoryService,
    event_config_repo: EventConfigRepository,
    id_gen: IdGenerator,
}

impl EventConfigService {
    /// Create a new event config service.
    #[must_use]
    pub const fn new(
        directory: WatchitDirectoryService,
        event_config_repo: EventConfigRepository,
    ) -> Self {
        Self {
            directory,
            event_config_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Fail unless the upstream directory knows `watchit_uuid`.
    pub async fn validate_watchit_uuid(&self, watchit_uuid: &str) -> AppResult<()> {
        if self.directory.exists(watchit_uuid).await? {
            Ok(())
        } else {
            debug!(watchit_uuid, "Unknown watchit");
            Err(AppError::field(WATCHIT_UUID_FIELD, WATCHIT_NOT_FOUND))
        }
    }

    /// Get the config row of an already validated watchit.
    pub async fn get_event_config(&self, watchit_uuid: &str) -> AppResult<event_config::Model> {
        self.event_config_repo
            .find_by_watchit_uuid(watchit_uuid)
            .await?
            .ok_or_else(|| AppError::field(WATCHIT_UUID_FIELD, EVENT_CONFIG_NOT_FOUND))
    }

    /// Get the config row of a watchit, creating it on first use.
    ///
    /// Returns the row and whether it was created by this call.
    pub async fn get_or_create(&self, watchit_uuid: &str) -> AppResult<(event_config::Model, bool)> {
        if let Some(existing) = self.event_config_repo.find_by_watchit_uuid(watchit_uuid).await? {
            return Ok((existing, false));
        }

        let model = event_config::ActiveModel {
            id: Set(self.id_gen.generate()),
            watchit_uuid: Set(watchit_uuid.to_string()),
            default_polls_config_id: Set(None),
            default_questions_config_id: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        match self.event_config_repo.create(model).await {
            Ok(created) => {
                info!(watchit_uuid, event_config_id = %created.id, "Created event config");
                Ok((created, true))
            }
            Err(err) => {
                // A concurrent request may have inserted the same watchit
                warn!(watchit_uuid, error = %err, "Event config insert failed, re-reading");
                self.event_config_repo
                    .find_by_watchit_uuid(watchit_uuid)
                    .await?
                    .map(|existing| (existing, false))
                    .ok_or(err)
            }
        }
    }

    /// Point the event's default poll configuration at `config_id`.
    pub async fn link_default_polls_config(
        &self,
        event_config: event_config::Model,
        config_id: Uuid,
    ) -> AppResult<event_config::Model> {
        let mut active: event_config::ActiveModel = event_config.into();
        active.default_polls_config_id = Set(Some(config_id));
        active.updated_at = Set(Some(Utc::now().into()));
        self.event_config_repo.update(active).await
    }

    /// Point the event's default question configuration at `config_id`.
    pub async fn link_default_questions_config(
        &self,
        event_config: event_config::Model,
        config_id: Uuid,
    ) -> AppResult<event_config::Model> {
        let mut active: event_config::ActiveModel = event_config.into();
        active.default_questions_config_id = Set(Some(config_id));
        active.updated_at = Set(Some(Utc::now().into()));
        self.event_config_repo.update(active).await
    }
}
