//! Apex request validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client input errors detected before any org round-trip.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ApexRequestError {
    /// A required field is absent or has the wrong JSON type
    #[error("{field} must be specified")]
    MissingField {
        /// Name of the offending body field
        field: String,
    },
}

impl ApexRequestError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField { field: field.to_string() }
    }
}
