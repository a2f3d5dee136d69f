//! # LWC Preview Types
//!
//! Core types, models, and error definitions for the LWC preview server.
//!
//! - **`error`** - Typed error hierarchy for configuration and Apex requests
//! - **`models`** - Domain models (org connection, Aura config, Apex wire format, project layout)
//!
//! ## Architecture Role
//!
//! `lwc-preview-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!         lwc-preview-types (this crate)
//!                  │
//!                  ▼
//!          lwc-preview-core
//!                  │
//!                  ▼
//!         lwc-preview-server
//! ```
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod models;

pub use error::{ApexRequestError, ConfigError};

pub use models::{
    ApexActionResponse, ApexRequest, AuraActionEnvelope, AuraConfig, AuraContext,
    ConnectionParams, ProjectConfig, ServerConfig, DEFAULT_HOST, DEFAULT_PORT,
};
