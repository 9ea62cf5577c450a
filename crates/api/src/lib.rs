//! HTTP API layer for watchit polls and questions.
//!
//! - **Endpoints**: default and per-resource poll/question configuration, poll lookup
//! - **Extractors**: JSON bodies mapped onto field errors
//! - **State**: services shared across handlers
//!
//! Built on Axum 0.8. Every route lives under `/events/{watchit_uuid}`.

pub mod endpoints;
pub mod extractors;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
