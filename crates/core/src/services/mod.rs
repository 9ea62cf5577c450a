//! Business logic services.

pub mod event_config;
pub mod poll;
pub mod poll_config;
pub mod question_config;
pub mod watchit;

pub use event_config::EventConfigService;
pub use poll::PollService;
pub use poll_config::{PollConfigInput, PollConfigService, UpdatePollConfigInput};
pub use question_config::{QuestionConfigInput, QuestionConfigService, UpdateQuestionConfigInput};
pub use watchit::{
    HttpWatchitDirectory, StaticWatchitDirectory, WatchitDirectory, WatchitDirectoryService,
    directory_from_config,
};
