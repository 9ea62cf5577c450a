//! Poll configuration and poll endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;
use watchit_common::{AppError, AppResult};
use watchit_core::{PollConfigInput, UpdatePollConfigInput};
use watchit_db::entities::{poll, poll_config};

use super::body_or_reject;
use crate::{
    extractors::ApiJson,
    response::{ApiResponse, ToggleResponse},
    state::AppState,
};

/// Poll configuration response.
#[derive(Debug, Serialize)]
pub struct PollConfigResponse {
    /// Configuration id.
    pub id: Uuid,
    /// Whether the feature is on.
    pub enabled: bool,
    /// Voters may pick several choices.
    pub allow_multiple_choices: bool,
    /// Results are shown to voters.
    pub show_results: bool,
    /// Votes are anonymous.
    pub anonymous_votes: bool,
    /// Voting window in seconds, 0 for none.
    pub duration_seconds: i32,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last update time, RFC 3339.
    pub updated_at: Option<String>,
}

impl From<poll_config::Model> for PollConfigResponse {
    fn from(config: poll_config::Model) -> Self {
        Self {
            id: config.id,
            enabled: config.enabled,
            allow_multiple_choices: config.allow_multiple_choices,
            show_results: config.show_results,
            anonymous_votes: config.anonymous_votes,
            duration_seconds: config.duration_seconds,
            created_at: config.created_at.to_rfc3339(),
            updated_at: config.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Poll response.
#[derive(Debug, Serialize)]
pub struct PollResponse {
    /// Poll id.
    pub id: i32,
    /// Owning watchit.
    pub watchit_uuid: String,
    /// Poll title.
    pub title: String,
    /// Choices as a JSON array.
    pub choices: JsonValue,
    /// Configuration applied to this poll, if any.
    pub poll_config_id: Option<Uuid>,
    /// Creation time, RFC 3339.
    pub created_at: String,
}

impl From<poll::Model> for PollResponse {
    fn from(poll: poll::Model) -> Self {
        Self {
            id: poll.id,
            watchit_uuid: poll.watchit_uuid,
            title: poll.title,
            choices: poll.choices,
            poll_config_id: poll.poll_config_id,
            created_at: poll.created_at.to_rfc3339(),
        }
    }
}

async fn get_default_config(
    State(state): State<AppState>,
    Path(watchit_uuid): Path<String>,
) -> AppResult<ApiResponse<PollConfigResponse>> {
    let config = state.poll_config_service.get_default(&watchit_uuid).await?;
    Ok(ApiResponse::ok(config.into()))
}

async fn save_default_config(
    State(state): State<AppState>,
    Path(watchit_uuid): Path<String>,
    payload: Result<ApiJson<PollConfigInput>, AppError>,
) -> AppResult<ApiResponse<PollConfigResponse>> {
    let input = body_or_reject(
        payload,
        state.event_config_service.validate_watchit_uuid(&watchit_uuid),
    )
    .await?;
    let config = state
        .poll_config_service
        .replace_default(&watchit_uuid, input)
        .await?;
    Ok(ApiResponse::created(config.into()))
}

async fn toggle_default_config(
    State(state): State<AppState>,
    Path(watchit_uuid): Path<String>,
) -> AppResult<ApiResponse<ToggleResponse>> {
    let enabled = state.poll_config_service.toggle_default(&watchit_uuid).await?;
    Ok(ApiResponse::ok(ToggleResponse { enabled }))
}

async fn get_config(
    State(state): State<AppState>,
    Path((watchit_uuid, config_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<PollConfigResponse>> {
    let config = state.poll_config_service.get(&watchit_uuid, &config_id).await?;
    Ok(ApiResponse::ok(config.into()))
}

async fn update_config(
    State(state): State<AppState>,
    Path((watchit_uuid, config_id)): Path<(String, String)>,
    payload: Result<ApiJson<UpdatePollConfigInput>, AppError>,
) -> AppResult<ApiResponse<PollConfigResponse>> {
    let known_config = async {
        state
            .poll_config_service
            .get(&watchit_uuid, &config_id)
            .await
            .map(drop)
    };
    let input = body_or_reject(payload, known_config).await?;
    let config = state
        .poll_config_service
        .update(&watchit_uuid, &config_id, input)
        .await?;
    Ok(ApiResponse::ok(config.into()))
}

async fn get_poll(
    State(state): State<AppState>,
    Path((watchit_uuid, poll_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<PollResponse>> {
    let poll = state.poll_service.get(&watchit_uuid, &poll_id).await?;
    Ok(ApiResponse::ok(poll.into()))
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
            "/config/{poll_configuration_id}",
            get(get_config).put(update_config),
        )
        .route("/{poll_id}", get(get_poll))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_poll_config_response_is_snake_case() {
        let id = Uuid::now_v7();
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let response = PollConfigResponse::from(poll_config::Model {
            id,
            enabled: true,
            allow_multiple_choices: false,
            show_results: true,
            anonymous_votes: false,
            duration_seconds: 60,
            created_at: created_at.into(),
            updated_at: None,
        });

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["id"], json!(id.to_string()));
        assert_eq!(value["allow_multiple_choices"], json!(false));
        assert_eq!(value["duration_seconds"], json!(60));
        assert_eq!(value["created_at"], json!("2025-03-01T12:00:00+00:00"));
        assert!(value["updated_at"].is_null());
    }

    #[test]
    fn test_poll_response_keeps_choices() {
        let response = PollResponse::from(poll::Model {
            id: 9,
            watchit_uuid: "e1".to_string(),
            title: "Next topic".to_string(),
            choices: json!(["rust", "go"]),
            poll_config_id: None,
            created_at: Utc::now().into(),
        });

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["id"], json!(9));
        assert_eq!(value["choices"], json!(["rust", "go"]));
        assert!(value["poll_config_id"].is_null());
    }
}
