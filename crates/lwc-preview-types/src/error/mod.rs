//! Typed error definitions shared across the workspace.
//!
//! All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging and plain-text HTTP bodies
//! - **Matchable** for error handling logic via enum variants

mod apex;
mod config;

pub use apex::ApexRequestError;
pub use config::ConfigError;
