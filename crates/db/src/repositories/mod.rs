//! Database repositories.

mod event_config;
mod poll;
mod poll_config;
mod question_config;

pub use event_config::EventConfigRepository;
pub use poll::PollRepository;
pub use poll_config::PollConfigRepository;
pub use question_config::QuestionConfigRepository;
