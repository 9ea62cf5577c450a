//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error::Segment;
use tracing::debug;
use watchit_common::{AppError, FieldErrors};

/// Field key for errors not tied to a single input field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// JSON body whose rejections surface as field errors.
///
/// An empty body reads as `{}`. A value of the wrong type is reported under
/// the field it was found at; anything else that is not a JSON object lands
/// under [`NON_FIELD_ERRORS`].
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::field(NON_FIELD_ERRORS, rejection.body_text()))?;

        if bytes.is_empty() {
            return decode(b"{}").map(Self);
        }
        if !is_json {
            debug!("Rejected request body without a JSON content type");
            return Err(AppError::field(
                NON_FIELD_ERRORS,
                "Expected request with `Content-Type: application/json`",
            ));
        }
        decode(&bytes).map(Self)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        debug!(error = %err, "Rejected request body");
        AppError::Validation(body_errors(&err))
    })
}

fn body_errors(err: &serde_path_to_error::Error<serde_json::Error>) -> FieldErrors {
    let inner = err.inner();
    let message = strip_position(&inner.to_string());
    let in_field = matches!(err.path().iter().next(), Some(Segment::Map { .. }));

    if inner.classify() == Category::Data && in_field {
        FieldErrors::single(err.path().to_string(), message)
    } else {
        FieldErrors::single(NON_FIELD_ERRORS, message)
    }
}

/// Drop serde_json's trailing "at line X column Y".
fn strip_position(message: &str) -> String {
    message
        .rsplit_once(" at line ")
        .map_or(message, |(head, _)| head)
        .to_string()
}
