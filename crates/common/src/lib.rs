//! Common utilities and shared types for watchit-polls.
//!
//! This crate provides foundational components used across all watchit-polls crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID and UUID v7 identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use watchit_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("{}:{} -> {}", config.server.host, config.server.port, id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult, FieldErrors};
pub use id::IdGenerator;
