//! Local project layout resolution.
//!
//! SFDX projects are detected by `sfdx-project.json`; their sources live under
//! `<package>/main/default`. Anything else is treated as a plain LWC project.

mod labels;

pub use labels::LabelResolver;

use lwc_preview_types::{ConfigError, ProjectConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const SFDX_PROJECT_FILE: &str = "sfdx-project.json";
const DEFAULT_PACKAGE_DIR: &str = "force-app";
const DEFAULT_NAMESPACE: &str = "c";
const CUSTOM_LABELS_FILE: &str = "CustomLabels.labels-meta.xml";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SfdxProject {
    #[serde(default)]
    package_directories: Vec<PackageDirectory>,
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageDirectory {
    path: String,
    #[serde(default)]
    default: bool,
}

/// Work out where modules, static resources, content assets and labels live.
pub fn resolve_project(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    if !project_dir.is_dir() {
        return Err(ConfigError::NotFound { path: project_dir.display().to_string() });
    }

    let sfdx_file = project_dir.join(SFDX_PROJECT_FILE);
    let config = if sfdx_file.is_file() {
        let content = fs::read_to_string(&sfdx_file).map_err(|e| ConfigError::from_io_error(&e))?;
        let project: SfdxProject =
            serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
        resolve_sfdx(project_dir, &project)
    } else {
        resolve_plain(project_dir)
    };

    tracing::info!(
        sfdx = config.is_sfdx,
        modules = %config.modules_dir.display(),
        namespace = %config.namespace,
        "Resolved project layout"
    );
    Ok(config)
}

fn resolve_sfdx(project_dir: &Path, project: &SfdxProject) -> ProjectConfig {
    let package = project
        .package_directories
        .iter()
        .find(|p| p.default)
        .or_else(|| project.package_directories.first())
        .map_or(DEFAULT_PACKAGE_DIR, |p| normalize_package_path(&p.path));

    let base = project_dir.join(package).join("main").join("default");
    let namespace = project
        .namespace
        .as_deref()
        .map(str::trim)
        .filter(|ns| !ns.is_empty())
        .unwrap_or(DEFAULT_NAMESPACE);

    ProjectConfig {
        project_dir: project_dir.to_path_buf(),
        is_sfdx: true,
        modules_dir: base.join("lwc"),
        static_resources_dir: base.join("staticresources"),
        content_assets_dir: base.join("contentassets"),
        custom_labels_file: base.join("labels").join(CUSTOM_LABELS_FILE),
        namespace: namespace.to_string(),
    }
}

fn resolve_plain(project_dir: &Path) -> ProjectConfig {
    let modules_dir = [project_dir.join("src").join("modules"), project_dir.join("modules")]
        .into_iter()
        .find(|p| p.is_dir())
        .unwrap_or_else(|| project_dir.to_path_buf());

    ProjectConfig {
        project_dir: project_dir.to_path_buf(),
        is_sfdx: false,
        modules_dir,
        static_resources_dir: project_dir.join("staticresources"),
        content_assets_dir: project_dir.join("contentassets"),
        custom_labels_file: project_dir.join("labels").join(CUSTOM_LABELS_FILE),
        namespace: DEFAULT_NAMESPACE.to_string(),
    }
}

fn normalize_package_path(path: &str) -> &str {
    let trimmed = path.trim().trim_start_matches("./").trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_PACKAGE_DIR
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_project_dir() {
        let err = resolve_project(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_sfdx_uses_default_package() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            SFDX_PROJECT_FILE,
            r#"{"packageDirectories": [{"path": "other"}, {"path": "./my-app/", "default": true}], "namespace": "acme"}"#,
        );

        let config = resolve_project(tmp.path()).unwrap();
        let base = tmp.path().join("my-app/main/default");
        assert!(config.is_sfdx);
        assert_eq!(config.modules_dir, base.join("lwc"));
        assert_eq!(config.static_resources_dir, base.join("staticresources"));
        assert_eq!(config.content_assets_dir, base.join("contentassets"));
        assert_eq!(config.custom_labels_file, base.join("labels/CustomLabels.labels-meta.xml"));
        assert_eq!(config.namespace, "acme");
    }

    #[test]
    fn test_sfdx_falls_back_to_first_then_force_app() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), SFDX_PROJECT_FILE, r#"{"packageDirectories": [{"path": "first"}]}"#);
        let config = resolve_project(tmp.path()).unwrap();
        assert_eq!(config.modules_dir, tmp.path().join("first/main/default/lwc"));
        assert_eq!(config.namespace, "c");

        write(tmp.path(), SFDX_PROJECT_FILE, r#"{"namespace": ""}"#);
        let config = resolve_project(tmp.path()).unwrap();
        assert_eq!(config.modules_dir, tmp.path().join("force-app/main/default/lwc"));
        assert_eq!(config.namespace, "c");
    }

    #[test]
    fn test_sfdx_parse_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), SFDX_PROJECT_FILE, "{ not json");
        let err = resolve_project(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_plain_project_module_fallbacks() {
        let tmp = TempDir::new().unwrap();
        let config = resolve_project(tmp.path()).unwrap();
        assert!(!config.is_sfdx);
        assert_eq!(config.modules_dir, tmp.path());

        fs::create_dir_all(tmp.path().join("modules")).unwrap();
        assert_eq!(resolve_project(tmp.path()).unwrap().modules_dir, tmp.path().join("modules"));

        fs::create_dir_all(tmp.path().join("src/modules")).unwrap();
        let config = resolve_project(tmp.path()).unwrap();
        assert_eq!(config.modules_dir, tmp.path().join("src/modules"));
        assert_eq!(config.static_resources_dir, tmp.path().join("staticresources"));
    }
}
