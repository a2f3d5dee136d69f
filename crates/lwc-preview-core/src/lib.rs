//! # LWC Preview Core
//!
//! Core logic for the LWC preview server.
//!
//! ```text
//! lwc-preview-core/src/
//! ├── org/        # OrgSession (cookie-authenticated client) + ResourceLoader fetch policy
//! ├── aura/       # ScriptShell, AuraConfigScraper, ConfigCache
//! ├── apex/       # ApexInvoker + the /api/apex/execute middleware
//! └── project/    # Project layout resolution and custom labels
//! ```
//!
//! Request flow for an Apex call: middleware validates the body, fills the
//! config cache on a miss by scraping `/one/one.app`, then replays the call as
//! an Aura `ApexAction` against the org.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod apex;
pub mod aura;
pub mod error;
pub mod org;
pub mod project;

pub use apex::{apex_proxy_middleware, ApexInvoker, ApexProxy, APEX_EXECUTE_ROUTE};
pub use aura::{AuraConfigScraper, ConfigCache, InlineScriptShell, ScriptShell};
pub use error::{ApexError, OrgError, ProxyError, ScrapeError};
pub use org::{OrgSession, ResourceLoader};
pub use project::{resolve_project, LabelResolver};
