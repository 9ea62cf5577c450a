//! API integration tests.
//!
//! These tests drive the router end to end over a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use watchit_api::{AppState, router as api_router};
use watchit_core::{
    EventConfigService, PollConfigService, PollService, QuestionConfigService,
    StaticWatchitDirectory,
};
use watchit_db::entities::{event_config, poll, poll_config, question_config};
use watchit_db::repositories::{
    EventConfigRepository, PollConfigRepository, PollRepository, QuestionConfigRepository,
};

const WATCHIT: &str = "e1";

/// Create test app state over `db`, knowing only [`WATCHIT`].
fn create_test_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);
    let event_config_service = EventConfigService::new(
        Arc::new(StaticWatchitDirectory::new([WATCHIT])),
        EventConfigRepository::new(Arc::clone(&db)),
    );

    AppState {
        poll_config_service: PollConfigService::new(
            event_config_service.clone(),
            PollConfigRepository::new(Arc::clone(&db)),
        ),
        question_config_service: QuestionConfigService::new(
            event_config_service.clone(),
            QuestionConfigRepository::new(Arc::clone(&db)),
        ),
        poll_service: PollService::new(event_config_service.clone(), PollRepository::new(db)),
        event_config_service,
    }
}

/// Create the test router.
fn create_test_router(db: MockDatabase) -> Router {
    api_router().with_state(create_test_state(db.into_connection()))
}

fn empty_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn event_config(
    polls: Option<Uuid>,
    questions: Option<Uuid>,
) -> event_config::Model {
    event_config::Model {
        id: "01j5q0m9z8x7w6v5t4s3r2q1p0".to_string(),
        watchit_uuid: WATCHIT.to_string(),
        default_polls_config_id: polls,
        default_questions_config_id: questions,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn poll_config(id: Uuid) -> poll_config::Model {
    poll_config::Model {
        id,
        enabled: true,
        allow_multiple_choices: false,
        show_results: true,
        anonymous_votes: false,
        duration_seconds: 0,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn question_config(id: Uuid, enabled: bool) -> question_config::Model {
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

async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri).method(method);
    let body = match body {
        Some(body) => {
            request = request.header("Content-Type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_unknown_watchit_on_every_route() {
    let config_id = Uuid::now_v7();
    let routes = [
        ("GET", "/events/ghost/polls/default-config".to_string(), None),
        ("POST", "/events/ghost/polls/default-config".to_string(), Some("{}")),
        ("PATCH", "/events/ghost/polls/default-config".to_string(), None),
        ("GET", format!("/events/ghost/polls/config/{config_id}"), None),
        ("PUT", format!("/events/ghost/polls/config/{config_id}"), Some("{}")),
        ("GET", "/events/ghost/polls/1".to_string(), None),
        ("GET", "/events/ghost/questions/default-config".to_string(), None),
        ("POST", "/events/ghost/questions/default-config".to_string(), Some("{}")),
        ("PATCH", "/events/ghost/questions/default-config".to_string(), None),
        ("GET", format!("/events/ghost/questions/config/{config_id}"), None),
        ("PUT", format!("/events/ghost/questions/config/{config_id}"), Some("{}")),
    ];

    for (method, uri, body) in routes {
        let (status, value) = send(create_test_router(empty_db()), method, &uri, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(value, json!({"watchit_uuid": ["watchit not found"]}), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_malformed_body_for_unknown_watchit_reports_watchit() {
    let (status, value) = send(
        create_test_router(empty_db()),
        "POST",
        "/events/ghost/polls/default-config",
        Some("not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"watchit_uuid": ["watchit not found"]}));
}

#[tokio::test]
async fn test_malformed_body_reports_non_field_errors() {
    let (status, value) = send(
        create_test_router(empty_db()),
        "POST",
        "/events/e1/polls/default-config",
        Some("not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value.as_object().unwrap().len(), 1);
    assert!(value["non_field_errors"][0].is_string());
}

#[tokio::test]
async fn test_create_default_poll_config_for_new_event() {
    let config_id = Uuid::now_v7();
    let db = empty_db()
        .append_query_results([Vec::<event_config::Model>::new()])
        .append_query_results([[event_config(None, None)]])
        .append_query_results([[poll_config(config_id)]])
        .append_query_results([[event_config(Some(config_id), None)]]);

    let (status, value) = send(
        create_test_router(db),
        "POST",
        "/events/e1/polls/default-config",
        Some(r#"{"allow_multiple_choices": false}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["id"], json!(config_id.to_string()));
    assert_eq!(value["enabled"], json!(true));
    assert_eq!(value["duration_seconds"], json!(0));
}

#[tokio::test]
async fn test_replace_default_question_config() {
    let old_id = Uuid::now_v7();
    let new_id = Uuid::now_v7();
    let db = empty_db()
        .append_query_results([[event_config(None, Some(old_id))]])
        .append_query_results([[question_config(new_id, true)]])
        .append_query_results([[event_config(None, Some(new_id))]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }]);

    let (status, value) = send(
        create_test_router(db),
        "POST",
        "/events/e1/questions/default-config",
        Some("{}"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["id"], json!(new_id.to_string()));
    assert_eq!(value["max_length"], json!(280));
}

#[tokio::test]
async fn test_create_default_poll_config_validation_error() {
    let (status, value) = send(
        create_test_router(empty_db()),
        "POST",
        "/events/e1/polls/default-config",
        Some(r#"{"duration_seconds": -1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        value,
        json!({"duration_seconds": ["duration must be between 0 and 604800 seconds"]})
    );
}

#[tokio::test]
async fn test_get_default_poll_config_missing() {
    let db = empty_db().append_query_results([[event_config(None, None)]]);

    let (status, value) =
        send(create_test_router(db), "GET", "/events/e1/polls/default-config", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"watchit_uuid": ["poll config not found"]}));
}

#[tokio::test]
async fn test_toggle_default_question_config() {
    let id = Uuid::now_v7();
    let db = empty_db()
        .append_query_results([[event_config(None, Some(id))]])
        .append_query_results([
            vec![question_config(id, true)],
            vec![question_config(id, false)],
        ]);

    let (status, value) = send(
        create_test_router(db),
        "PATCH",
        "/events/e1/questions/default-config",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"enabled": false}));
}

#[tokio::test]
async fn test_get_poll_config_by_malformed_id() {
    let (status, value) = send(
        create_test_router(empty_db()),
        "GET",
        "/events/e1/polls/config/not-a-uuid",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"poll_configuration_id": ["poll config not found"]}));
}

#[tokio::test]
async fn test_update_question_config_by_id() {
    let id = Uuid::now_v7();
    let mut updated = question_config(id, true);
    updated.max_length = 500;
    let db = empty_db().append_query_results([vec![question_config(id, true)], vec![updated]]);

    let (status, value) = send(
        create_test_router(db),
        "PUT",
        &format!("/events/e1/questions/config/{id}"),
        Some(r#"{"max_length": 500}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["max_length"], json!(500));
    assert_eq!(value["allow_upvotes"], json!(true));
}

#[tokio::test]
async fn test_get_poll() {
    let db = empty_db().append_query_results([[poll::Model {
        id: 12,
        watchit_uuid: WATCHIT.to_string(),
        title: "Which room?".to_string(),
        choices: json!(["A", "B"]),
        poll_config_id: None,
        created_at: Utc::now().into(),
    }]]);

    let (status, value) = send(create_test_router(db), "GET", "/events/e1/polls/12", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["title"], json!("Which room?"));
    assert_eq!(value["choices"], json!(["A", "B"]));
}

#[tokio::test]
async fn test_get_poll_with_non_integer_id() {
    let (status, value) =
        send(create_test_router(empty_db()), "GET", "/events/e1/polls/twelve", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"poll_id": ["poll not found"]}));
}

#[tokio::test]
async fn test_database_failure_is_server_error() {
    // No query results queued, so the event config lookup fails
    let (status, value) = send(
        create_test_router(empty_db()),
        "GET",
        "/events/e1/questions/default-config",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"]["code"], json!("DATABASE_ERROR"));
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let (status, _) =
        send(create_test_router(empty_db()), "GET", "/nonexistent/endpoint", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_field_type_is_reported_under_field() {
    let (status, value) = send(
        create_test_router(empty_db()),
        "POST",
        "/events/e1/polls/default-config",
        Some(r#"{"enabled": "yes"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = value.as_object().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(value["enabled"][0].as_str().unwrap().starts_with("invalid type"));
}

#[tokio::test]
async fn test_update_missing_config_reported_before_bad_body() {
    let db = empty_db().append_query_results([Vec::<poll_config::Model>::new()]);

    let (status, value) = send(
        create_test_router(db),
        "PUT",
        &format!("/events/e1/polls/config/{}", Uuid::now_v7()),
        Some(r#"{"duration_seconds": "x"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value, json!({"poll_configuration_id": ["poll config not found"]}));
}

#[tokio::test]
async fn test_update_existing_config_reports_bad_body() {
    let id = Uuid::now_v7();
    let db = empty_db().append_query_results([[question_config(id, true)]]);

    let (status, value) = send(
        create_test_router(db),
        "PUT",
        &format!("/events/e1/questions/config/{id}"),
        Some(r#"{"max_length": "long"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["max_length"][0].is_string());
}

#[tokio::test]
async fn test_empty_body_saves_defaults() {
    let config_id = Uuid::now_v7();
    let db = empty_db()
        .append_query_results([[event_config(None, None)]])
        .append_query_results([[poll_config(config_id)]])
        .append_query_results([[event_config(Some(config_id), None)]]);

    let (status, value) = send(
        create_test_router(db),
        "POST",
        "/events/e1/polls/default-config",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["id"], json!(config_id.to_string()));
}

#[tokio::test]
async fn test_create_read_toggle_scenario() {
    let id = Uuid::now_v7();
    let saved = poll_config(id);
    let mut toggled = saved.clone();
    toggled.enabled = false;
    let db = empty_db()
        // POST
        .append_query_results([[event_config(None, None)]])
        .append_query_results([[saved.clone()]])
        .append_query_results([[event_config(Some(id), None)]])
        // GET
        .append_query_results([[event_config(Some(id), None)]])
        .append_query_results([[saved.clone()]])
        // PATCH
        .append_query_results([[event_config(Some(id), None)]])
        .append_query_results([vec![saved.clone()], vec![toggled]]);
    let app = create_test_router(db);

    let (status, created) = send(
        app.clone(),
        "POST",
        "/events/e1/polls/default-config",
        Some(r#"{"enabled": true, "show_results": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = send(app.clone(), "GET", "/events/e1/polls/default-config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, value) = send(app, "PATCH", "/events/e1/polls/default-config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"enabled": false}));
}
