//! Extracts `Aura.initConfig` from the org's authenticated application shell.

use lwc_preview_types::AuraConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::inline_shell::InlineScriptShell;
use super::shell::{AuraGlobal, ScriptShell};
use crate::error::ScrapeError;
use crate::org::{OrgSession, ResourceLoader};

/// Authenticated Lightning application shell.
pub const APP_SHELL_PATH: &str = "/one/one.app";

/// Probes of the script environment before giving up.
pub const MAX_RETRIES: usize = 5;

/// Pause between probes while bootstrap scripts load.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Client-side redirect the org serves instead of the shell when the session is rejected.
const UNAUTHENTICATED_MARKER: &str = "window.location.replace(";

const AURA_NOT_FOUND: &str = "window.Aura not found";
const AURA_MISSING_INIT_CONFIG: &str = "window.Aura missing initConfig property";

pub struct AuraConfigScraper {
    session: Arc<OrgSession>,
    shell: Arc<dyn ScriptShell>,
    max_retries: usize,
    retry_delay: Duration,
}

impl AuraConfigScraper {
    pub fn new(session: Arc<OrgSession>) -> Self {
        Self {
            session,
            shell: Arc::new(InlineScriptShell),
            max_retries: MAX_RETRIES,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Swap the script environment implementation.
    pub fn with_shell(mut self, shell: Arc<dyn ScriptShell>) -> Self {
        self.shell = shell;
        self
    }

    pub fn with_retry_policy(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Load the application shell, run its bootstrap and poll for `Aura.initConfig`.
    pub async fn scrape(&self) -> Result<AuraConfig, ScrapeError> {
        let body = self.session.get(APP_SHELL_PATH).await?;

        if body.contains(UNAUTHENTICATED_MARKER) {
            tracing::warn!("Org redirected the application shell to login; session is not valid");
            return Err(ScrapeError::Unauthenticated);
        }

        let document_url = self.session.url_for(APP_SHELL_PATH)?;
        let loader = ResourceLoader::new(Arc::clone(&self.session));
        let window = self.shell.load_and_run(&body, &document_url, loader);

        let mut reason = AURA_NOT_FOUND.to_string();
        for attempt in 1..=self.max_retries {
            match window.aura() {
                Ok(Some(AuraGlobal { init_config: Some(config) })) if !config.is_null() => {
                    let config: AuraConfig = serde_json::from_value(config)?;
                    tracing::info!(
                        attempt,
                        fwuid = config.context.fwuid.as_deref().unwrap_or("<none>"),
                        "Retrieved Aura config"
                    );
                    return Ok(config);
                },
                Ok(Some(_)) => reason = AURA_MISSING_INIT_CONFIG.to_string(),
                Ok(None) => reason = AURA_NOT_FOUND.to_string(),
                Err(e) => reason = e.to_string(),
            }

            tracing::debug!(attempt, max = self.max_retries, reason = %reason, "Aura config not ready");
            if attempt < self.max_retries {
                sleep(self.retry_delay).await;
            }
        }

        tracing::warn!(reason = %reason, "Gave up waiting for Aura config");
        Err(ScrapeError::NotReady { reason })
    }
}
