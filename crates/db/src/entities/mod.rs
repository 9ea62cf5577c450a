//! Database entities.

#![allow(missing_docs)]

pub mod event_config;
pub mod poll;
pub mod poll_config;
pub mod question_config;

pub use event_config::Entity as EventConfig;
pub use poll::Entity as Poll;
pub use poll_config::Entity as PollConfig;
pub use question_config::Entity as QuestionConfig;
