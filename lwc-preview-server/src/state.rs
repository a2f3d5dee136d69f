//! Application State
//!
//! Holds the resolved project, the label resolver and, when an org is
//! configured, the Apex proxy with its config cache.

use anyhow::{Context, Result};
use std::sync::Arc;

use lwc_preview_core::{resolve_project, ApexProxy, LabelResolver};
use lwc_preview_types::{ProjectConfig, ServerConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub project: ProjectConfig,
    pub labels: LabelResolver,
    pub apex: Option<ApexProxy>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let project = resolve_project(&config.project_dir)
            .with_context(|| format!("Failed to resolve project at {}", config.project_dir.display()))?;

        let apex = config
            .connection
            .as_ref()
            .map(ApexProxy::new)
            .transpose()
            .context("Failed to create org session")?;

        if let Some(connection) = &config.connection {
            tracing::info!(instance = %connection.instance_url(), "Apex proxy enabled");
        } else {
            tracing::info!("No org connection configured; Apex proxy disabled");
        }

        Ok(Self::from_parts(project, apex))
    }

    pub fn from_parts(project: ProjectConfig, apex: Option<ApexProxy>) -> Self {
        let labels = LabelResolver::new(project.namespace.clone(), project.custom_labels_file.clone());
        Self { inner: Arc::new(AppStateInner { project, labels, apex }) }
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.inner.project
    }

    pub fn labels(&self) -> &LabelResolver {
        &self.inner.labels
    }

    pub fn apex(&self) -> Option<&ApexProxy> {
        self.inner.apex.as_ref()
    }
}
