//! Poll and question configuration logic for watchit events.

pub mod services;

pub use services::*;
