//! Org connection parameters.

use std::fmt;
use url::Url;

use crate::error::ConfigError;

/// Credentials for one authenticated org, fixed for the server's lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    instance_url: Url,
    access_token: String,
}

impl ConnectionParams {
    /// Validate and build connection params.
    ///
    /// The instance URL must be an absolute `http`/`https` URL with a host.
    pub fn new(instance_url: &str, access_token: impl Into<String>) -> Result<Self, ConfigError> {
        let trimmed = instance_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| ConfigError::ValidationError {
            field: "instance_url".to_string(),
            message: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigError::ValidationError {
                field: "instance_url".to_string(),
                message: format!("'{}' is not an absolute http(s) URL", trimmed),
            });
        }

        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "access_token".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(Self { instance_url: url, access_token })
    }

    pub fn instance_url(&self) -> &Url {
        &self.instance_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("instance_url", &self.instance_url.as_str())
            .field("access_token", &"<redacted>")
            .finish()
    }
}
