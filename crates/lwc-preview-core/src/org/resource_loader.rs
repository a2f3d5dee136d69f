use bytes::Bytes;
use std::sync::Arc;
use url::Url;

use super::OrgSession;
use crate::error::OrgError;

const BOOTSTRAP_SCRIPT_SUFFIX: &str = "/inline.js";

/// Fetch policy for scripts referenced by the org application shell.
///
/// Only same-origin `/inline.js` is loaded. The full Aura framework bundle
/// and every third-party resource resolve to `None`, so only the bootstrap
/// script that assigns `Aura.initConfig` ever runs.
#[derive(Clone)]
pub struct ResourceLoader {
    session: Arc<OrgSession>,
}

impl ResourceLoader {
    pub fn new(session: Arc<OrgSession>) -> Self {
        Self { session }
    }

    /// Whether `url` passes the origin + path policy.
    pub fn allows(&self, url: &Url) -> bool {
        url.origin() == self.session.origin() && url.path().ends_with(BOOTSTRAP_SCRIPT_SUFFIX)
    }

    /// Fetch `url` if allowed. Refused or unparsable URLs give `Ok(None)`;
    /// transport failures on an allowed URL are returned as errors.
    pub async fn fetch(&self, url: &str) -> Result<Option<Bytes>, OrgError> {
        let Ok(parsed) = Url::parse(url) else {
            tracing::debug!(url, "Refusing unparsable resource URL");
            return Ok(None);
        };

        if !self.allows(&parsed) {
            tracing::trace!(url, "Skipping resource outside bootstrap policy");
            return Ok(None);
        }

        // Request the validated URL itself; re-joining its path onto the base
        // would let `//host/...` escape the org origin.
        tracing::debug!(path = parsed.path(), "Loading bootstrap script");
        self.session.get_bytes_at(parsed).await.map(Some)
    }
}
