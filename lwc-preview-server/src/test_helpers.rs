//! Test helpers for lwc-preview-server unit tests.

use std::fs;

use tempfile::TempDir;

use lwc_preview_core::{resolve_project, ApexProxy};

use crate::state::AppState;

const LABELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomLabels xmlns="http://soap.sforce.com/2006/04/metadata">
    <labels>
        <fullName>greeting</fullName>
        <language>en_US</language>
        <protected>false</protected>
        <shortDescription>greeting</shortDescription>
        <value>Hello there</value>
    </labels>
</CustomLabels>
"#;

/// Create an `AppState` over a throwaway SFDX project.
///
/// Returns `(AppState, TempDir)`; keep `TempDir` alive for the test duration.
pub fn test_app_state(apex: Option<ApexProxy>) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let root = temp_dir.path();
    let default_dir = root.join("force-app/main/default");

    fs::write(
        root.join("sfdx-project.json"),
        r#"{"packageDirectories":[{"path":"force-app","default":true}]}"#,
    )
    .expect("failed to write sfdx-project.json");
    fs::create_dir_all(default_dir.join("lwc")).expect("failed to create lwc dir");
    fs::create_dir_all(default_dir.join("staticresources")).expect("failed to create staticresources dir");
    fs::create_dir_all(default_dir.join("labels")).expect("failed to create labels dir");
    fs::write(default_dir.join("staticresources/logo.svg"), "<svg/>").expect("failed to write resource");
    fs::write(default_dir.join("labels/CustomLabels.labels-meta.xml"), LABELS_XML)
        .expect("failed to write labels");

    let project = resolve_project(root).expect("failed to resolve test project");
    (AppState::from_parts(project, apex), temp_dir)
}
