//! Poll configuration service.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;
use watchit_common::{AppError, AppResult, IdGenerator};
use watchit_db::entities::poll_config;
use watchit_db::repositories::PollConfigRepository;

use super::event_config::{EventConfigService, WATCHIT_UUID_FIELD};

const POLL_CONFIG_NOT_FOUND: &str = "poll config not found";

/// Field key for per-resource poll config errors.
pub const POLL_CONFIGURATION_ID_FIELD: &str = "poll_configuration_id";

/// Input for creating a poll configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PollConfigInput {
    /// Whether polls are open. Defaults to true.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Let a voter pick more than one choice.
    #[serde(default)]
    pub allow_multiple_choices: bool,
    /// Show results to voters. Defaults to true.
    #[serde(default = "default_true")]
    pub show_results: bool,
    /// Hide who voted for what.
    #[serde(default)]
    pub anonymous_votes: bool,
    /// Voting window in seconds (0 = no time limit, at most one week).
    #[serde(default)]
    #[validate(range(
        min = 0,
        max = 604_800,
        message = "duration must be between 0 and 604800 seconds"
    ))]
    pub duration_seconds: i32,
}

impl Default for PollConfigInput {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_multiple_choices: false,
            show_results: true,
            anonymous_votes: false,
            duration_seconds: 0,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Input for updating a poll configuration. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePollConfigInput {
    /// New `enabled` value.
    pub enabled: Option<bool>,
    /// New `allow_multiple_choices` value.
    pub allow_multiple_choices: Option<bool>,
    /// New `show_results` value.
    pub show_results: Option<bool>,
    /// New `anonymous_votes` value.
    pub anonymous_votes: Option<bool>,
    /// New voting window in seconds.
    #[validate(range(
        min = 0,
        max = 604_800,
        message = "duration must be between 0 and 604800 seconds"
    ))]
    pub duration_seconds: Option<i32>,
}

/// Service for poll configurations, both event defaults and by id.
#[derive(Clone)]
pub struct PollConfigService {
    events: EventConfigService,
    poll_config_repo: PollConfigRepository,
    id_gen: IdGenerator,
}

impl PollConfigService {
    /// Create a new poll config service.
    #[must_use]
    pub const fn new(events: EventConfigService, poll_config_repo: PollConfigRepository) -> Self {
        Self {
            events,
            poll_config_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get the default poll configuration of a watchit.
    pub async fn get_default(&self, watchit_uuid: &str) -> AppResult<poll_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        let event_config = self.events.get_event_config(watchit_uuid).await?;

        let config_id = event_config
            .default_polls_config_id
            .ok_or_else(default_not_found)?;
        self.poll_config_repo
            .find_by_id(config_id)
            .await?
            .ok_or_else(default_not_found)
    }

    /// Save a new default poll configuration for a watchit.
    ///
    /// The event config is created if needed. A previous default is deleted
    /// only after the new one is linked.
    pub async fn replace_default(
        &self,
        watchit_uuid: &str,
        input: PollConfigInput,
    ) -> AppResult<poll_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        input.validate()?;

        let (event_config, _) = self.events.get_or_create(watchit_uuid).await?;
        let old_config_id = event_config.default_polls_config_id;

        let model = poll_config::ActiveModel {
            id: Set(self.id_gen.generate_config_id()),
            enabled: Set(input.enabled),
            allow_multiple_choices: Set(input.allow_multiple_choices),
            show_results: Set(input.show_results),
            anonymous_votes: Set(input.anonymous_votes),
            duration_seconds: Set(input.duration_seconds),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };
        let new_config = self.poll_config_repo.create(model).await?;

        self.events
            .link_default_polls_config(event_config, new_config.id)
            .await?;

        if let Some(old_id) = old_config_id {
            self.poll_config_repo.delete(old_id).await?;
        }

        info!(
            watchit_uuid,
            config_id = %new_config.id,
            replaced = ?old_config_id,
            "Saved default poll config"
        );
        Ok(new_config)
    }

    /// Flip `enabled` on the watchit's default poll configuration.
    ///
    /// Returns the new value.
    pub async fn toggle_default(&self, watchit_uuid: &str) -> AppResult<bool> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        let event_config = self.events.get_event_config(watchit_uuid).await?;

        let config_id = event_config
            .default_polls_config_id
            .ok_or_else(default_not_found)?;
        let config = self
            .poll_config_repo
            .find_by_id(config_id)
            .await?
            .ok_or_else(default_not_found)?;

        let enabled = !config.enabled;
        let mut active: poll_config::ActiveModel = config.into();
        active.enabled = Set(enabled);
        active.updated_at = Set(Some(Utc::now().into()));
        let updated = self.poll_config_repo.update(active).await?;

        info!(
            watchit_uuid,
            config_id = %updated.id,
            enabled = updated.enabled,
            "Toggled default poll config"
        );
        Ok(updated.enabled)
    }

    /// Get a poll configuration by its own id.
    pub async fn get(&self, watchit_uuid: &str, config_id: &str) -> AppResult<poll_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        self.find_by_raw_id(config_id).await
    }

    /// Apply `input` onto the poll configuration addressed by id.
    pub async fn update(
        &self,
        watchit_uuid: &str,
        config_id: &str,
        input: UpdatePollConfigInput,
    ) -> AppResult<poll_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        let config = self.find_by_raw_id(config_id).await?;
        input.validate()?;

        let mut active: poll_config::ActiveModel = config.into();
        if let Some(enabled) = input.enabled {
            active.enabled = Set(enabled);
        }
        if let Some(allow_multiple_choices) = input.allow_multiple_choices {
            active.allow_multiple_choices = Set(allow_multiple_choices);
        }
        if let Some(show_results) = input.show_results {
            active.show_results = Set(show_results);
        }
        if let Some(anonymous_votes) = input.anonymous_votes {
            active.anonymous_votes = Set(anonymous_votes);
        }
        if let Some(duration_seconds) = input.duration_seconds {
            active.duration_seconds = Set(duration_seconds);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        let updated = self.poll_config_repo.update(active).await?;
        info!(watchit_uuid, config_id = %updated.id, "Updated poll config");
        Ok(updated)
    }

    async fn find_by_raw_id(&self, config_id: &str) -> AppResult<poll_config::Model> {
        let Ok(id) = Uuid::parse_str(config_id) else {
            debug!(config_id, "Malformed poll config id");
            return Err(by_id_not_found());
        };
        self.poll_config_repo
            .find_by_id(id)
            .await?
            .ok_or_else(by_id_not_found)
    }
}

fn default_not_found() -> AppError {
    AppError::field(WATCHIT_UUID_FIELD, POLL_CONFIG_NOT_FOUND)
}

fn by_id_not_found() -> AppError {
    AppError::field(POLL_CONFIGURATION_ID_FIELD, POLL_CONFIG_NOT_FOUND)
}
