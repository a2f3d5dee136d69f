//! Resolved local project layout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a project keeps the pieces the dev server serves.
///
/// Resolution rules live in `lwc-preview-core`; this is the result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    pub project_dir: PathBuf,
    /// `true` when an `sfdx-project.json` was found
    pub is_sfdx: bool,
    pub modules_dir: PathBuf,
    pub static_resources_dir: PathBuf,
    pub content_assets_dir: PathBuf,
    pub custom_labels_file: PathBuf,
    /// Namespace used for component and label lookups (`c` unless configured)
    pub namespace: String,
}
