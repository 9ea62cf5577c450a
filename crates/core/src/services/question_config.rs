//! Question configuration service.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;
use watchit_common::{AppError, AppResult, IdGenerator};
use watchit_db::entities::question_config;
use watchit_db::repositories::QuestionConfigRepository;

use super::event_config::{EventConfigService, WATCHIT_UUID_FIELD};

const QUESTION_CONFIG_NOT_FOUND: &str = "question config not found";

/// Field key for per-resource question config errors.
pub const QUESTION_CONFIGURATION_ID_FIELD: &str = "question_configuration_id";

/// Input for creating a question configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionConfigInput {
    /// Whether questions are accepted. Defaults to true.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Accept questions without an author.
    #[serde(default)]
    pub allow_anonymous: bool,
    /// Hold questions until a moderator approves them.
    #[serde(default)]
    pub requires_moderation: bool,
    /// Let attendees upvote questions. Defaults to true.
    #[serde(default = "default_true")]
    pub allow_upvotes: bool,
    /// Maximum question length in characters. Defaults to 280.
    #[serde(default = "default_max_length")]
    #[validate(range(min = 1, max = 2000, message = "max length must be between 1 and 2000"))]
    pub max_length: i32,
}

impl Default for QuestionConfigInput {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_anonymous: false,
            requires_moderation: false,
            allow_upvotes: true,
            max_length: default_max_length(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_max_length() -> i32 {
    280
}

/// Input for updating a question configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuestionConfigInput {
    /// New `enabled` value.
    pub enabled: Option<bool>,
    /// New `allow_anonymous` value.
    pub allow_anonymous: Option<bool>,
    /// New `requires_moderation` value.
    pub requires_moderation: Option<bool>,
    /// New `allow_upvotes` value.
    pub allow_upvotes: Option<bool>,
    /// New maximum question length.
    #[validate(range(min = 1, max = 2000, message = "max length must be between 1 and 2000"))]
    pub max_length: Option<i32>,
}

/// Service for question configurations.
#[derive(Clone)]
pub struct QuestionConfigService {
    events: EventConfigService,
    question_config_repo: QuestionConfigRepository,
    id_gen: IdGenerator,
}

impl QuestionConfigService {
    /// Create a new question config service.
    #[must_use]
    pub const fn new(
        events: EventConfigService,
        question_config_repo: QuestionConfigRepository,
    ) -> Self {
        Self {
            events,
            question_config_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get the default question configuration of a watchit.
    pub async fn get_default(&self, watchit_uuid: &str) -> AppResult<question_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        let event_config = self.events.get_event_config(watchit_uuid).await?;

        let config_id = event_config
            .default_questions_config_id
            .ok_or_else(default_not_found)?;
        self.question_config_repo
            .find_by_id(config_id)
            .await?
            .ok_or_else(default_not_found)
    }

    /// Save a new default question configuration, replacing any previous one.
    pub async fn replace_default(
        &self,
        watchit_uuid: &str,
        input: QuestionConfigInput,
    ) -> AppResult<question_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        input.validate()?;

        let (event_config, _) = self.events.get_or_create(watchit_uuid).await?;
        let old_config_id = event_config.default_questions_config_id;

        let model = question_config::ActiveModel {
            id: Set(self.id_gen.generate_config_id()),
            enabled: Set(input.enabled),
            allow_anonymous: Set(input.allow_anonymous),
            requires_moderation: Set(input.requires_moderation),
            allow_upvotes: Set(input.allow_upvotes),
            max_length: Set(input.max_length),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };
        let new_config = self.question_config_repo.create(model).await?;

        // Link first so the event is never left without a default
        self.events
            .link_default_questions_config(event_config, new_config.id)
            .await?;

        if let Some(old_id) = old_config_id {
            self.question_config_repo.delete(old_id).await?;
        }

        info!(
            watchit_uuid,
            config_id = %new_config.id,
            replaced = ?old_config_id,
            "Saved default question config"
        );
        Ok(new_config)
    }

    /// Flip `enabled` on the watchit's default question configuration.
    pub async fn toggle_default(&self, watchit_uuid: &str) -> AppResult<bool> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        let event_config = self.events.get_event_config(watchit_uuid).await?;

        let config_id = event_config
            .default_questions_config_id
            .ok_or_else(default_not_found)?;
        let config = self
            .question_config_repo
            .find_by_id(config_id)
            .await?
            .ok_or_else(default_not_found)?;

        let enabled = !config.enabled;
        let mut active: question_config::ActiveModel = config.into();
        active.enabled = Set(enabled);
        active.updated_at = Set(Some(Utc::now().into()));
        let updated = self.question_config_repo.update(active).await?;

        info!(
            watchit_uuid,
            config_id = %updated.id,
            enabled = updated.enabled,
            "Toggled default question config"
        );
        Ok(updated.enabled)
    }

    /// Get a question configuration by its own id.
    pub async fn get(
        &self,
        watchit_uuid: &str,
        config_id: &str,
    ) -> AppResult<question_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        self.find_by_raw_id(config_id).await
    }

    /// Apply `input` onto the question configuration addressed by id.
    pub async fn update(
        &self,
        watchit_uuid: &str,
        config_id: &str,
        input: UpdateQuestionConfigInput,
    ) -> AppResult<question_config::Model> {
        self.events.validate_watchit_uuid(watchit_uuid).await?;
        let config = self.find_by_raw_id(config_id).await?;
        input.validate()?;

        let mut active: question_config::ActiveModel = config.into();
        if let Some(enabled) = input.enabled {
            active.enabled = Set(enabled);
        }
        if let Some(allow_anonymous) = input.allow_anonymous {
            active.allow_anonymous = Set(allow_anonymous);
        }
        if let Some(requires_moderation) = input.requires_moderation {
            active.requires_moderation = Set(requires_moderation);
        }
        if let Some(allow_upvotes) = input.allow_upvotes {
            active.allow_upvotes = Set(allow_upvotes);
        }
        if let Some(max_length) = input.max_length {
            active.max_length = Set(max_length);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        let updated = self.question_config_repo.update(active).await?;
        info!(watchit_uuid, config_id = %updated.id, "Updated question config");
        Ok(updated)
    }

    async fn find_by_raw_id(&self, config_id: &str) -> AppResult<question_config::Model> {
        let Ok(id) = Uuid::parse_str(config_id) else {
            debug!(config_id, "Malformed question config id");
            return Err(by_id_not_found());
        };
        self.question_config_repo
            .find_by_id(id)
            .await?
            .ok_or_else(by_id_not_found)
    }
}

fn default_not_found() -> AppError {
    AppError::field(WATCHIT_UUID_FIELD, QUESTION_CONFIG_NOT_FOUND)
}

fn by_id_not_found() -> AppError {
    AppError::field(QUESTION_CONFIGURATION_ID_FIELD, QUESTION_CONFIG_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::watchit::StaticWatchitDirectory;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use watchit_db::entities::event_config;
    use watchit_db::repositories::EventConfigRepository;

    fn create_test_event_config(default_questions_config_id: Option<Uuid>) -> event_config::Model {
        event_config::Model {
            id: "01j0000000000000000000000b".to_string(),
            watchit_uuid: "e1".to_string(),
            default_polls_config_id: None,
            default_questions_config_id,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_question_config(id: Uuid, enabled: bool) -> question_config::Model {
        question_config::Model {
            id,
            enabled,
            allow_anonymous: false,
            requires_moderation: false,
            allow_upvotes: true,
            max_length: 280,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: DatabaseConnection) -> QuestionConfigService {
        let db = Arc::new(db);
        let events = EventConfigService::new(
            Arc::new(StaticWatchitDirectory::new(["e1"])),
            EventConfigRepository::new(Arc::clone(&db)),
        );
        QuestionConfigService::new(events, QuestionConfigRepository::new(db))
    }

    fn messages(err: &AppError, field: &str) -> Vec<String> {
        err.field_errors().unwrap().get(field).unwrap().to_vec()
    }

    #[tokio::test]
    async fn test_unknown_watchit() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let err = service.toggle_default("ghost").await.unwrap_err();

        assert_eq!(messages(&err, "watchit_uuid"), ["watchit not found"]);
    }

    #[tokio::test]
    async fn test_replace_default_on_existing_event() {
        let old_id = Uuid::now_v7();
        let new_id = Uuid::now_v7();
        let created = create_test_question_config(new_id, true);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_event_config(Some(old_id))]])
            .append_query_results([[created.clone()]])
            .append_query_results([[create_test_event_config(Some(new_id))]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let result = service(db)
            .replace_default("e1", QuestionConfigInput::default())
            .await
            .unwrap();

        assert_eq!(result, created);
    }

    #[tokio::test]
    async fn test_replace_default_fails_when_old_delete_fails() {
        let old_id = Uuid::now_v7();
        let new_id = Uuid::now_v7();
        // No exec result queued: the delete of the previous default errors
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_event_config(Some(old_id))]])
            .append_query_results([[create_test_question_config(new_id, true)]])
            .append_query_results([[create_test_event_config(Some(new_id))]])
            .into_connection();

        let err = service(db)
            .replace_default("e1", QuestionConfigInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_replace_default_rejects_zero_max_length() {
        let input = QuestionConfigInput {
            max_length: 0,
            ..QuestionConfigInput::default()
        };

        let err = service(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
            .replace_default("e1", input)
            .await
            .unwrap_err();

        assert_eq!(
            messages(&err, "max_length"),
            ["max length must be between 1 and 2000"]
        );
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_value() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_event_config(Some(id))]])
            .append_query_results([
                vec![create_test_question_config(id, true)],
                vec![create_test_question_config(id, false)],
            ])
            .append_query_results([[create_test_event_config(Some(id))]])
            .append_query_results([
                vec![create_test_question_config(id, false)],
                vec![create_test_question_config(id, true)],
            ])
            .into_connection();
        let service = service(db);

        assert!(!service.toggle_default("e1").await.unwrap());
        assert!(service.toggle_default("e1").await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_without_default() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_event_config(None)]])
            .into_connection();

        let err = service(db).toggle_default("e1").await.unwrap_err();

        assert_eq!(messages(&err, "watchit_uuid"), ["question config not found"]);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<question_config::Model>::new()])
            .into_connection();

        let err = service(db)
            .get("e1", &Uuid::now_v7().to_string())
            .await
            .unwrap_err();

        assert_eq!(
            messages(&err, "question_configuration_id"),
            ["question config not found"]
        );
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_max_length() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_question_config(id, true)]])
            .into_connection();
        let input = UpdateQuestionConfigInput {
            max_length: Some(5000),
            ..UpdateQuestionConfigInput::default()
        };

        let err = service(db)
            .update("e1", &id.to_string(), input)
            .await
            .unwrap_err();

        assert_eq!(
            messages(&err, "max_length"),
            ["max length must be between 1 and 2000"]
        );
    }

    #[tokio::test]
    async fn test_update_sets_moderation() {
        let id = Uuid::now_v7();
        let mut updated = create_test_question_config(id, true);
        updated.requires_moderation = true;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![create_test_question_config(id, true)],
                vec![updated],
            ])
            .into_connection();
        let input = UpdateQuestionConfigInput {
            requires_moderation: Some(true),
            ..UpdateQuestionConfigInput::default()
        };

        let result = service(db)
            .update("e1", &id.to_string(), input)
            .await
            .unwrap();

        assert!(result.requires_moderation);
        assert_eq!(result.max_length, 280);
    }
}
