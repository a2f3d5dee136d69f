//! Core domain models for the LWC preview server.

mod apex;
mod aura;
mod config;
mod connection;
mod project;

pub use apex::{
    ActionDescriptor, ActionParams, ActionResult, ApexActionResponse, ApexRequest,
    AuraActionEnvelope, APEX_ACTION_DESCRIPTOR,
};
pub use aura::{is_truthy, AuraConfig, AuraContext, WireContext};
pub use config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use connection::ConnectionParams;
pub use project::ProjectConfig;
