//! HTTP transport abstraction for talking to the search endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use crate::Result;

/// Default per-request timeout, matching what a browser tolerates.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for issuing the pipeline's outbound HTTP requests.
///
/// All configuration (headers, timeout, proxy) is set at construction time;
/// the trait surface is a plain request-in, body-out interface so the
/// pipeline can be driven by a mock in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request with query parameters and returns the body text.
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String>;

    /// Issues a form-encoded POST request and returns the body text.
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<String>;
}

/// Builds the browser-mimicking header set the search endpoint expects.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Accept",
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("Referer", HeaderValue::from_static("https://duckduckgo.com/"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    headers
}

/// Default browser-like user agent.
pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// A transport backed by a reqwest [`Client`].
///
/// Non-2xx responses are surfaced as errors rather than returned as bodies.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default browser headers and timeout.
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent(DEFAULT_USER_AGENT)
                .default_headers(browser_headers())
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Creates a transport from a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<String> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
