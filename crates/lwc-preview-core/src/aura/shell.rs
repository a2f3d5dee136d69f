use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::org::ResourceLoader;

/// Capability to load an HTML document and run its scripts.
///
/// Construction returns immediately; scripts may still be loading, so the
/// returned view can be empty for a while and callers poll it.
pub trait ScriptShell: Send + Sync {
    fn load_and_run(
        &self,
        html: &str,
        document_url: &Url,
        loader: ResourceLoader,
    ) -> Arc<dyn GlobalObjectView>;
}

/// Read-only view of the script environment's global object.
pub trait GlobalObjectView: Send + Sync {
    /// `Ok(None)` while `window.Aura` is undefined.
    fn aura(&self) -> Result<Option<AuraGlobal>, ScriptError>;
}

/// The parts of `window.Aura` the scraper looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuraGlobal {
    pub init_config: Option<Value>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("failed to load script {url}: {message}")]
    ResourceLoad { url: String, message: String },

    #[error("script evaluation failed: {0}")]
    Evaluation(String),
}
