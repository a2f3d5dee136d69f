//! Authenticated access to one Salesforce org.

pub mod client_builder;
mod resource_loader;

pub use resource_loader::ResourceLoader;

use bytes::Bytes;
use lwc_preview_types::ConnectionParams;
use reqwest::{Client, Response};
use url::{Origin, Url};

use crate::error::OrgError;

/// Request timeout for org calls. Apex methods can be slow.
const ORG_REQUEST_TIMEOUT_SECS: u64 = 120;

/// HTTP client bound to an org's base URL with the session cookie pre-attached.
///
/// No retries happen here; callers own their retry policy.
pub struct OrgSession {
    client: Client,
    base_url: Url,
}

impl OrgSession {
    pub fn new(params: &ConnectionParams) -> Result<Self, OrgError> {
        let client = client_builder::build_org_client(
            params.instance_url(),
            params.access_token(),
            ORG_REQUEST_TIMEOUT_SECS,
        )?;
        Ok(Self::with_client(client, params.instance_url().clone()))
    }

    /// Use a pre-built client (tests, custom TLS setups).
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn origin(&self) -> Origin {
        self.base_url.origin()
    }

    /// Absolute URL for an org-relative path such as `/one/one.app`.
    ///
    /// Paths that resolve to another origin (`//host/x` is scheme-relative)
    /// are rejected.
    pub fn url_for(&self, path: &str) -> Result<Url, OrgError> {
        let url = self.base_url.join(path).map_err(|e| OrgError::InvalidUrl {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.ensure_same_origin(url, path)
    }

    fn ensure_same_origin(&self, url: Url, path: &str) -> Result<Url, OrgError> {
        if url.origin() == self.origin() {
            Ok(url)
        } else {
            Err(OrgError::InvalidUrl {
                path: path.to_string(),
                message: "resolves outside the org origin".to_string(),
            })
        }
    }

    /// GET `path` and return the body as text.
    pub async fn get(&self, path: &str) -> Result<String, OrgError> {
        let resp = self.send_get(path).await?;
        Ok(resp.text().await?)
    }

    /// GET an absolute same-origin `url` exactly as given and return the raw body.
    pub async fn get_bytes_at(&self, url: Url) -> Result<Bytes, OrgError> {
        let label = url.to_string();
        let url = self.ensure_same_origin(url, &label)?;
        let path = url.path().to_string();
        let resp = self.send(url, &path).await?;
        Ok(resp.bytes().await?)
    }

    /// POST a form-encoded body to `path` and return the response text.
    pub async fn post_form(&self, path: &str, fields: &[(&str, String)]) -> Result<String, OrgError> {
        let url = self.url_for(path)?;
        tracing::debug!(path, "POST to org");
        let resp = self.client.post(url).form(fields).send().await?;
        let resp = check_status(resp, path)?;
        Ok(resp.text().await?)
    }

    async fn send_get(&self, path: &str) -> Result<Response, OrgError> {
        let url = self.url_for(path)?;
        self.send(url, path).await
    }

    async fn send(&self, url: Url, path: &str) -> Result<Response, OrgError> {
        tracing::debug!(path, "GET from org");
        let resp = self.client.get(url).send().await?;
        check_status(resp, path)
    }
}

fn check_status(resp: Response, path: &str) -> Result<Response, OrgError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(OrgError::Status { status: status.as_u16(), path: path.to_string() })
    }
}
