//! Error types for the core crate.
//!
//! Every failure on the Apex path ends up as a [`ProxyError`], which knows how
//! to render itself as the 500 response the browser-side caller expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lwc_preview_types::ApexRequestError;
use serde_json::Value;
use thiserror::Error;

/// Failures talking to the org over HTTP.
#[derive(Error, Debug)]
pub enum OrgError {
    /// Network request failed (HTTP client).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Org answered with a non-success status.
    #[error("Org returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    /// Path could not be joined onto the instance URL.
    #[error("Invalid org URL '{path}': {message}")]
    InvalidUrl { path: String, message: String },
}

/// Failures producing an `AuraConfig` from the org's application shell.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The org bounced the session to a login page.
    #[error("error retrieving aura config: unauthenticated")]
    Unauthenticated,

    /// Retries exhausted; carries the last reason observed.
    #[error("error retrieving aura config: {reason}")]
    NotReady { reason: String },

    /// `Aura.initConfig` was found but does not have the expected shape.
    #[error("error retrieving aura config: invalid initConfig: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Fetching the application shell failed.
    #[error("error retrieving aura config: {0}")]
    Org(#[from] OrgError),
}

/// Failures executing an Apex action against the org.
#[derive(Error, Debug)]
pub enum ApexError {
    /// Org response body was not valid JSON or carried no action.
    #[error("error parsing apex response: {0}")]
    Parse(String),

    /// Action ran but the org reported a fault; payload is the literal `error` array.
    #[error("apex action failed: {0}")]
    Action(Value),

    /// Outgoing envelope could not be serialized.
    #[error("error encoding apex request: {0}")]
    Encode(String),

    #[error(transparent)]
    Org(#[from] OrgError),
}

/// Anything the Apex proxy middleware can fail with.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    Validation(#[from] ApexRequestError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Apex(#[from] ApexError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Apex(ApexError::Action(error)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": error })),
            )
                .into_response(),
            ProxyError::Apex(ApexError::Org(e)) => {
                tracing::error!(error = %e, "Apex action transport failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            },
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
        }
    }
}
