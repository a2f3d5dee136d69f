//! Apex request and Aura action wire formats.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApexRequestError;

/// Descriptor of the server-side controller action that runs Apex methods.
pub const APEX_ACTION_DESCRIPTOR: &str = "aura://ApexActionController/ACTION$execute";

const CALLING_DESCRIPTOR: &str = "UNKNOWN";

/// A single Apex method call requested by a component.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApexRequest {
    pub namespace: String,
    pub classname: String,
    pub method: String,
    pub cacheable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl ApexRequest {
    /// Validate an incoming request body.
    ///
    /// Fields are checked in the order `classname`, `method`, `namespace`,
    /// `cacheable`; the first failure wins. Anything other than a JSON object
    /// is treated as an empty body. `params` is passed through untyped, an
    /// explicit `null` included; only an absent key is omitted.
    pub fn from_body(body: &Value) -> Result<Self, ApexRequestError> {
        let string_field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ApexRequestError::missing(name))
        };

        let classname = string_field("classname")?;
        let method = string_field("method")?;
        let namespace = string_field("namespace")?;
        let cacheable = body
            .get("cacheable")
            .and_then(Value::as_bool)
            .ok_or_else(|| ApexRequestError::missing("cacheable"))?;
        let params = body.get("params").cloned();

        Ok(Self { namespace, classname, method, cacheable, params })
    }
}

/// `message` form field of an ApexAction submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuraActionEnvelope {
    pub actions: Vec<ActionDescriptor>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub id: String,
    pub descriptor: String,
    pub calling_descriptor: String,
    pub params: ActionParams,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionParams {
    pub namespace: String,
    pub classname: String,
    pub method: String,
    pub cacheable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub is_continuation: bool,
}

impl AuraActionEnvelope {
    /// Wrap one Apex call into a single-action envelope.
    pub fn for_request(request: &ApexRequest) -> Self {
        Self {
            actions: vec![ActionDescriptor {
                id: "0".to_string(),
                descriptor: APEX_ACTION_DESCRIPTOR.to_string(),
                calling_descriptor: CALLING_DESCRIPTOR.to_string(),
                params: ActionParams {
                    namespace: request.namespace.clone(),
                    classname: request.classname.clone(),
                    method: request.method.clone(),
                    cacheable: request.cacheable,
                    params: request.params.clone(),
                    is_continuation: false,
                },
            }],
        }
    }
}

/// Body returned by `/aura?aura.ApexAction.execute=1`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApexActionResponse {
    #[serde(default)]
    pub actions: Vec<ActionResult>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    #[serde(default)]
    pub return_value: Option<Value>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ActionResult {
    pub fn is_error(&self) -> bool {
        self.state.as_deref() == Some("ERROR")
    }
}
