//! API endpoints.

mod polls;
mod questions;

use axum::Router;
use watchit_common::{AppError, AppResult};

use crate::extractors::ApiJson;
use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/events/{watchit_uuid}",
        Router::new()
            .nest("/polls", polls::router())
            .nest("/questions", questions::router()),
    )
}

/// Unwrap a request body.
///
/// A rejected body is reported only once `precheck` passes, so lookup errors
/// such as an unknown watchit take precedence over a malformed body.
async fn body_or_reject<T, F>(payload: Result<ApiJson<T>, AppError>, precheck: F) -> AppResult<T>
where
    F: Future<Output = AppResult<()>>,
{
    match payload {
        Ok(ApiJson(body)) => Ok(body),
        Err(err) => {
            precheck.await?;
            Err(err)
        }
    }
}
