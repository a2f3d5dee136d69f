use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Build an HTTP client that sends `sid=<token>` to the org origin.
///
/// Cookies set by the org during the session land in the same jar.
pub fn build_org_client(
    instance_url: &Url,
    access_token: &str,
    timeout_secs: u64,
) -> Result<reqwest::Client, reqwest::Error> {
    let jar = Jar::default();
    jar.add_cookie_str(&format!("sid={}; Path=/", access_token), instance_url);

    reqwest::Client::builder()
        .cookie_provider(Arc::new(jar))
        .timeout(Duration::from_secs(timeout_secs.max(5)))
        .tcp_nodelay(true)
        .build()
}
