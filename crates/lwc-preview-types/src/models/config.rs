//! Server configuration.

use std::path::PathBuf;

use super::ConnectionParams;

pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub project_dir: PathBuf,
    /// Org used for Apex calls; `None` leaves the Apex proxy unmounted
    pub connection: Option<ConnectionParams>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            project_dir: PathBuf::from("."),
            connection: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        assert_eq!(ServerConfig::default().bind_address(), "127.0.0.1:3333");
    }
}
