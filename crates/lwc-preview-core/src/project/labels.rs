//! Custom label lookup.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Default, Deserialize)]
struct CustomLabels {
    #[serde(rename = "labels", default)]
    labels: Vec<CustomLabel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomLabel {
    full_name: String,
    #[serde(default)]
    value: String,
}

/// Resolves `@salesforce/label/<namespace>.<key>` imports.
///
/// Labels of the project namespace come from the project's
/// `CustomLabels.labels-meta.xml`, read on first lookup. Unknown labels
/// resolve to a `[namespace.key]` placeholder so previews still render.
pub struct LabelResolver {
    namespace: String,
    source: Option<PathBuf>,
    labels: OnceLock<HashMap<String, String>>,
}

impl LabelResolver {
    pub fn new(namespace: impl Into<String>, labels_file: PathBuf) -> Self {
        Self { namespace: namespace.into(), source: Some(labels_file), labels: OnceLock::new() }
    }

    /// Resolver over an in-memory label set.
    pub fn from_labels(namespace: impl Into<String>, labels: HashMap<String, String>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(labels);
        Self { namespace: namespace.into(), source: None, labels: cell }
    }

    pub fn lookup(&self, namespace: &str, key: &str) -> Option<&str> {
        if namespace != self.namespace {
            return None;
        }
        self.labels().get(key).map(String::as_str)
    }

    /// Label value, or the `[namespace.key]` placeholder.
    pub fn resolve(&self, namespace: &str, key: &str) -> String {
        self.lookup(namespace, key)
            .map_or_else(|| format!("[{}.{}]", namespace, key), str::to_string)
    }

    fn labels(&self) -> &HashMap<String, String> {
        self.labels.get_or_init(|| self.source.as_deref().map(load_labels).unwrap_or_default())
    }
}

fn load_labels(path: &Path) -> HashMap<String, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No custom labels file");
            return HashMap::new();
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read custom labels");
            return HashMap::new();
        },
    };

    match parse_labels(&content) {
        Ok(labels) => {
            tracing::info!(count = labels.len(), "Loaded custom labels");
            labels
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse custom labels");
            HashMap::new()
        },
    }
}

fn parse_labels(xml: &str) -> Result<HashMap<String, String>, quick_xml::DeError> {
    let parsed: CustomLabels = quick_xml::de::from_str(xml)?;
    Ok(parsed.labels.into_iter().map(|l| (l.full_name, l.value)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LABELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomLabels xmlns="http://soap.sforce.com/2006/04/metadata">
    <labels>
        <fullName>greeting</fullName>
        <language>en_US</language>
        <protected>true</protected>
        <shortDescription>greeting</shortDescription>
        <value>Hello, world</value>
    </labels>
    <labels>
        <fullName>farewell</fullName>
        <language>en_US</language>
        <protected>true</protected>
        <shortDescription>farewell</shortDescription>
        <value>Goodbye</value>
    </labels>
</CustomLabels>"#;

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels(LABELS_XML).unwrap();
        assert_eq!(labels.get("greeting").map(String::as_str), Some("Hello, world"));
        assert_eq!(labels.get("farewell").map(String::as_str), Some("Goodbye"));
    }

    #[test]
    fn test_resolve_from_file_and_placeholder() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CustomLabels.labels-meta.xml");
        std::fs::write(&path, LABELS_XML).unwrap();

        let resolver = LabelResolver::new("c", path);
        assert_eq!(resolver.resolve("c", "greeting"), "Hello, world");
        assert_eq!(resolver.resolve("c", "missing"), "[c.missing]");
        assert_eq!(resolver.resolve("other", "greeting"), "[other.greeting]");
    }

    #[test]
    fn test_missing_file_yields_placeholders() {
        let tmp = TempDir::new().unwrap();
        let resolver = LabelResolver::new("c", tmp.path().join("nope.xml"));
        assert_eq!(resolver.lookup("c", "greeting"), None);
        assert_eq!(resolver.resolve("c", "greeting"), "[c.greeting]");
    }

    #[test]
    fn test_malformed_file_yields_placeholders() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CustomLabels.labels-meta.xml");
        std::fs::write(&path, "<CustomLabels><labels><fullName>x").unwrap();

        let resolver = LabelResolver::new("c", path);
        assert_eq!(resolver.resolve("c", "x"), "[c.x]");
    }

    #[test]
    fn test_in_memory_labels() {
        let resolver =
            LabelResolver::from_labels("acme", HashMap::from([("title".to_string(), "Hi".to_string())]));
        assert_eq!(resolver.resolve("acme", "title"), "Hi");
        assert_eq!(resolver.resolve("c", "title"), "[c.title]");
    }
}
