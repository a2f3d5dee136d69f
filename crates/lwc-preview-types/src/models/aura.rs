//! Aura bootstrap configuration scraped from an org's application shell.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `Aura.initConfig` object: credential plus framework context.
///
/// Only the fields the Apex proxy needs are kept; everything else in the
/// scraped object is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuraConfig {
    /// Opaque credential echoed back as `aura.token`
    pub token: String,
    #[serde(default)]
    pub context: AuraContext,
}

/// Framework context as reported by the org.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuraContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fwuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dn: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globals: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uad: Option<Value>,
}

/// Context as sent in the `aura.context` form field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WireContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fwuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded: Option<Value>,
    pub dn: Vec<String>,
    pub globals: Map<String, Value>,
    pub uad: Value,
}

impl AuraContext {
    /// Build the outgoing context, filling `dn`, `globals` and `uad` defaults.
    ///
    /// `uad` is kept only when it is JS-truthy, so an explicit `false` or `0`
    /// from the org becomes `true`.
    pub fn to_wire(&self) -> WireContext {
        let uad = match &self.uad {
            Some(v) if is_truthy(v) => v.clone(),
            _ => Value::Bool(true),
        };

        WireContext {
            mode: self.mode.clone(),
            fwuid: self.fwuid.clone(),
            app: self.app.clone(),
            loaded: self.loaded.clone(),
            dn: self.dn.clone().unwrap_or_default(),
            globals: self.globals.clone().unwrap_or_default(),
            uad,
        }
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
