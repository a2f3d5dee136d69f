use clap::Parser;
use std::path::PathBuf;

use lwc_preview_types::{ConfigError, ConnectionParams, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(
    name = "lwc-preview-server",
    about = "Local preview server for Lightning Web Components",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(short, long, env = "LWC_PREVIEW_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "LWC_PREVIEW_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short = 'd', long, env = "LWC_PREVIEW_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    #[arg(long, env = "SF_INSTANCE_URL", help = "Org instance URL used for Apex calls")]
    pub instance_url: Option<String>,

    #[arg(
        long,
        env = "SF_ACCESS_TOKEN",
        hide_env_values = true,
        help = "Session id for the org (sent as the sid cookie)"
    )]
    pub access_token: Option<String>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Turn parsed flags into a validated [`ServerConfig`].
    ///
    /// The org connection needs both the instance URL and the access token.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let connection = match (&self.instance_url, &self.access_token) {
            (Some(url), Some(token)) => Some(ConnectionParams::new(url, token.clone())?),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::ValidationError {
                    field: "access_token".to_string(),
                    message: "required when --instance-url is set".to_string(),
                });
            },
            (None, Some(_)) => {
                return Err(ConfigError::ValidationError {
                    field: "instance_url".to_string(),
                    message: "required when --access-token is set".to_string(),
                });
            },
        };

        Ok(ServerConfig {
            host: self.host.clone(),
            port: self.port,
            project_dir: self.project_dir.clone(),
            connection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["lwc-preview-server"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_org_connection_is_optional() {
        let config = parse(&["--port", "4000", "--project-dir", "/tmp/app"]).server_config().unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.project_dir, PathBuf::from("/tmp/app"));
        assert!(config.connection.is_none());
    }

    #[test]
    fn test_defaults_match_server_config() {
        let config = parse(&[]).server_config().unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address(), ServerConfig::default().bind_address());
    }

    #[test]
    fn test_org_connection_from_flags() {
        let config = parse(&[
            "--instance-url",
            "https://na1.salesforce.com",
            "--access-token",
            "00D!sid",
        ])
        .server_config()
        .unwrap();
        let connection = config.connection.unwrap();
        assert_eq!(connection.instance_url().as_str(), "https://na1.salesforce.com/");
        assert_eq!(connection.access_token(), "00D!sid");
    }

    #[test]
    fn test_partial_org_connection_is_rejected() {
        let err = parse(&["--instance-url", "https://na1.salesforce.com"]).server_config().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "access_token"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
