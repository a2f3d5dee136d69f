use lwc_preview_types::{ApexActionResponse, ApexRequest, AuraActionEnvelope, AuraConfig};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApexError;
use crate::org::OrgSession;

/// Aura endpoint that executes `ApexActionController` actions.
pub const APEX_EXECUTE_PATH: &str = "/aura?aura.ApexAction.execute=1";

/// Page URI reported with each action.
pub const APEX_PAGE_URI: &str = "/lightning/n/Apex";

/// Replays Apex calls as signed Aura actions.
pub struct ApexInvoker {
    session: Arc<OrgSession>,
}

impl ApexInvoker {
    pub fn new(session: Arc<OrgSession>) -> Self {
        Self { session }
    }

    /// Execute `request` and return the unwrapped `returnValue` (absent → `None`).
    pub async fn invoke(
        &self,
        config: &AuraConfig,
        request: &ApexRequest,
    ) -> Result<Option<Value>, ApexError> {
        let form = build_form(config, request)?;
        tracing::debug!(
            namespace = %request.namespace,
            classname = %request.classname,
            method = %request.method,
            "Invoking Apex action"
        );

        let body = self.session.post_form(APEX_EXECUTE_PATH, &form).await?;
        interpret_response(&body)
    }
}

/// Form fields for an ApexAction submission.
pub(crate) fn build_form(
    config: &AuraConfig,
    request: &ApexRequest,
) -> Result<Vec<(&'static str, String)>, ApexError> {
    let message = serde_json::to_string(&AuraActionEnvelope::for_request(request))
        .map_err(|e| ApexError::Encode(e.to_string()))?;
    let context = serde_json::to_string(&config.context.to_wire())
        .map_err(|e| ApexError::Encode(e.to_string()))?;

    Ok(vec![
        ("message", message),
        ("aura.pageURI", APEX_PAGE_URI.to_string()),
        ("aura.context", context),
        ("aura.token", config.token.clone()),
    ])
}

/// Turn the raw org response into the proxy's result contract.
pub(crate) fn interpret_response(body: &str) -> Result<Option<Value>, ApexError> {
    let response: ApexActionResponse =
        serde_json::from_str(body).map_err(|e| ApexError::Parse(e.to_string()))?;

    // Aura answers framework faults with `exceptionEvent` and no actions.
    let Some(action) = response.actions.into_iter().next() else {
        return Err(ApexError::Parse("missing actions[0]".to_string()));
    };

    if action.is_error() {
        return Err(ApexError::Action(action.error.unwrap_or_else(|| Value::Array(Vec::new()))));
    }

    Ok(action.return_value)
}
