//! `/api/apex/execute` middleware.
//!
//! Mounted with `axum::middleware::from_fn_with_state`. Requests outside the
//! Apex route go straight to `next`; matching requests are answered here.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use lwc_preview_types::{ApexRequest, ConnectionParams};
use serde_json::Value;
use std::sync::Arc;

use super::invoker::ApexInvoker;
use crate::aura::{AuraConfigScraper, ConfigCache};
use crate::error::{OrgError, ProxyError};
use crate::org::OrgSession;

pub const APEX_EXECUTE_ROUTE: &str = "/api/apex/execute";

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Per-server Apex proxy: one org connection, one config cache.
#[derive(Clone)]
pub struct ApexProxy {
    inner: Arc<ApexProxyInner>,
}

struct ApexProxyInner {
    scraper: AuraConfigScraper,
    invoker: ApexInvoker,
    cache: ConfigCache,
}

impl ApexProxy {
    pub fn new(params: &ConnectionParams) -> Result<Self, OrgError> {
        let session = Arc::new(OrgSession::new(params)?);
        Ok(Self::from_parts(
            AuraConfigScraper::new(Arc::clone(&session)),
            ApexInvoker::new(session),
            ConfigCache::new(),
        ))
    }

    pub fn from_parts(scraper: AuraConfigScraper, invoker: ApexInvoker, cache: ConfigCache) -> Self {
        Self { inner: Arc::new(ApexProxyInner { scraper, invoker, cache }) }
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.inner.cache
    }

    /// Validate `body`, make sure the Aura config is cached, then run the action.
    pub async fn execute(&self, body: &Value) -> Result<Option<Value>, ProxyError> {
        let request = ApexRequest::from_body(body)?;

        let config = self
            .inner
            .cache
            .get_or_try_init(|| self.inner.scraper.scrape())
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Aura config scrape failed"))?;

        Ok(self.inner.invoker.invoke(&config, &request).await?)
    }
}

pub async fn apex_proxy_middleware(
    State(proxy): State<ApexProxy>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(APEX_EXECUTE_ROUTE) {
        return next.run(request).await;
    }

    let bytes = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("failed to read request body: {}", e))
                .into_response();
        },
    };
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    match proxy.execute(&body).await {
        Ok(value) => Json(value.unwrap_or(Value::Null)).into_response(),
        Err(e) => e.into_response(),
    }
}
