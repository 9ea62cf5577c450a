//! Question configuration endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;
use watchit_common::{AppError, AppResult};
use watchit_core::{QuestionConfigInput, UpdateQuestionConfigInput};
use watchit_db::entities::question_config;

use super::body_or_reject;
use crate::{
    extractors::ApiJson,
    response::{ApiResponse, ToggleResponse},
    state::AppState,
};

/// Question configuration response.
#[derive(Debug, Serialize)]
pub struct QuestionConfigResponse {
    /// Configuration id.
    pub id: Uuid,
    /// Whether the feature is on.
    pub enabled: bool,
    /// Anonymous questions are accepted.
    pub allow_anonymous: bool,
    /// Questions wait for moderation.
    pub requires_moderation: bool,
    /// Questions can be upvoted.
    pub allow_upvotes: bool,
    /// Maximum question length in characters.
    pub max_length: i32,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last update time, RFC 3339.
    pub updated_at: Option<String>,
}

impl From<question_config::Model> for QuestionConfigResponse {
    fn from(config: question_config::Model) -> Self {
        Self {
            id: config.id,
            enabled: config.enabled,
            allow_anonymous: config.allow_anonymous,
            requires_moderation: config.requires_moderation,
            allow_upvotes: config.allow_upvotes,
            max_length: config.max_length,
            created_at: config.created_at.to_rfc3339(),
            updated_at: config.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

async fn get_default_config(
    State(state): State<AppState>,
    Path(watchit_uuid): Path<String>,
) -> AppResult<ApiResponse<QuestionConfigResponse>> {
    let config = state
        .question_config_service
        .get_default(&watchit_uuid)
        .await?;
    Ok(ApiResponse::ok(config.into()))
}

async fn save_default_config(
    State(state): State<AppState>,
    Path(watchit_uuid): Path<String>,
    payload: Result<ApiJson<QuestionConfigInput>, AppError>,
) -> AppResult<ApiResponse<QuestionConfigResponse>> {
    let input = body_or_reject(
        payload,
        state.event_config_service.validate_watchit_uuid(&watchit_uuid),
    )
    .await?;
    let config = state
        .question_config_service
        .replace_default(&watchit_uuid, input)
        .await?;
    Ok(ApiResponse::created(config.into()))
}

async fn toggle_default_config(
    State(state): State<AppState>,
    Path(watchit_uuid): Path<String>,
) -> AppResult<ApiResponse<ToggleResponse>> {
    let enabled = state
        .question_config_service
        .toggle_default(&watchit_uuid)
        .await?;
    Ok(ApiResponse::ok(ToggleResponse { enabled }))
}

async fn get_config(
    State(state): State<AppState>,
    Path((watchit_uuid, config_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<QuestionConfigResponse>> {
    let config = state
        .question_config_service
        .get(&watchit_uuid, &config_id)
        .await?;
    Ok(ApiResponse::ok(config.into()))
}

async fn update_config(
    State(state): State<AppState>,
    Path((watchit_uuid, config_id)): Path<(String, String)>,
    payload: Result<ApiJson<UpdateQuestionConfigInput>, AppError>,
) -> AppResult<ApiResponse<QuestionConfigResponse>> {
    let known_config = async {
        state
            .question_config_service
            .get(&watchit_uuid, &config_id)
            .await
            .map(drop)
    };
    let input = body_or_reject(payload, known_config).await?;
    let config = state
        .question_config_service
        .update(&watchit_uuid, &config_id, input)
        .await?;
    Ok(ApiResponse::ok(config.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/default-config",
            get(get_default_config)
                .post(save_default_config)
                .patch(toggle_default_config),
        )
        .route(
            "/config/{question_configuration_id}",
            get(get_config).put(update_config),
        )
}
