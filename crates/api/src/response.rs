//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON representation paired with its success status.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    body: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a 200 response.
    pub const fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// Create a 201 response.
    pub const fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Result of flipping a default configuration.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// The value after the flip.
    pub enabled: bool,
}
