//! Shared application state.

use watchit_core::{EventConfigService, PollConfigService, PollService, QuestionConfigService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Watchit validation and event config access.
    pub event_config_service: EventConfigService,
    /// Poll configurations.
    pub poll_config_service: PollConfigService,
    /// Question configurations.
    pub question_config_service: QuestionConfigService,
    /// Poll lookup.
    pub poll_service: PollService,
}
