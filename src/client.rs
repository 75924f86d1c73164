//! Client facade tying transport, paginator, stream and downloader together.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::fs::{create_dir_all, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::paginator::Paginator;
use crate::transport::{browser_headers, HttpTransport, Transport, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::{parser, ImageQuery, ImageResult, ImageStream, Result};

const FALLBACK_FILENAME: &str = "downloaded_image";

/// Asynchronous image search client.
///
/// One client may run any number of query executions concurrently; each
/// execution is independent and shares nothing mutable with the others.
pub struct Client {
    transport: Arc<dyn Transport>,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client with default settings.
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Returns a builder for customizing timeout, user agent and proxy.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Creates a client over a custom transport.
    ///
    /// Downloads still go through a default reqwest client; the transport
    /// only carries the search pipeline.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            http: reqwest::Client::new(),
        }
    }

    /// Starts a query execution and returns its lazy result stream.
    ///
    /// No request is issued until the stream is first polled. Errors,
    /// including an empty query, surface through the stream.
    pub fn search(&self, query: ImageQuery) -> ImageStream {
        ImageStream::new(Paginator::new(self.transport.clone(), query))
    }

    /// Runs a query execution to completion and collects the results.
    pub async fn search_collect(&self, query: ImageQuery) -> Result<Vec<ImageResult>> {
        self.search(query).collect_results().await
    }

    /// Fetches a webpage and extracts all absolute image URLs found on it.
    pub async fn page_images(&self, url: &str) -> Result<Vec<String>> {
        let html = self.transport.get(url, &[]).await?;
        parser::extract_page_images(&html, url)
    }

    /// Downloads a file and saves it under `output_dir`.
    ///
    /// The filename defaults to the URL's last path segment with any query
    /// string stripped. Returns the path written.
    pub async fn download(
        &self,
        url: &str,
        output_dir: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        let filename = filename
            .map(String::from)
            .unwrap_or_else(|| infer_filename(url));
        let output_dir = output_dir.as_ref();
        create_dir_all(output_dir).await?;
        let path = output_dir.join(filename);

        let mut response = self.http.get(url).send().await?.error_for_status()?;
        let mut writer = BufWriter::new(File::create(&path).await?);
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            written += chunk.len() as u64;
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;

        debug!(url, bytes = written, path = %path.display(), "download complete");
        Ok(path)
    }

    /// Downloads the full-size image of a search result.
    pub async fn download_result(
        &self,
        result: &ImageResult,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.download(&result.image_url, output_dir, None).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ClientBuilder {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Routes all requests through a proxy
    /// (e.g. `http://127.0.0.1:8080` or `socks5://127.0.0.1:1080`).
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy = Some(proxy_url.into());
        self
    }

    /// Builds the client. Fails if the proxy URL is invalid or the TLS
    /// backend cannot initialize.
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .default_headers(browser_headers())
            .timeout(self.timeout);
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        let http = builder.build()?;

        Ok(Client {
            transport: Arc::new(HttpTransport::with_client(http.clone())),
            http,
        })
    }
}

fn infer_filename(url: &str) -> String {
    let name = url
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .split('?')
        .next()
        .unwrap_or_default();
    // Percent-escapes are common in CDN paths; decode them unless doing so
    // would introduce a path separator.
    let name = match urlencoding::decode(name) {
        Ok(decoded) if !decoded.contains(['/', '\\']) => decoded.into_owned(),
        _ => name.to_string(),
    };
    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let _client = Client::new();
    }

    #[test]
    fn test_client_default() {
        let _client = Client::default();
    }

    #[test]
    fn test_builder_defaults() {
        let builder = Client::builder();
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert!(builder.proxy.is_none());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_builder_custom() {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("test-agent/1.0")
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_with_proxy() {
        let client = Client::builder().proxy("http://127.0.0.1:8080").build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_invalid_proxy() {
        let client = Client::builder().proxy("not a proxy url").build();
        assert!(client.is_err());
    }

    #[test]
    fn test_infer_filename_plain() {
        assert_eq!(
            infer_filename("https://example.com/images/panda.jpg"),
            "panda.jpg"
        );
    }

    #[test]
    fn test_infer_filename_strips_query() {
        assert_eq!(
            infer_filename("https://example.com/panda.jpg?w=200&h=100"),
            "panda.jpg"
        );
    }

    #[test]
    fn test_infer_filename_decodes_percent_escapes() {
        assert_eq!(
            infer_filename("https://example.com/red%20panda%20%281%29.jpg"),
            "red panda (1).jpg"
        );
    }

    #[test]
    fn test_infer_filename_keeps_encoded_separators() {
        assert_eq!(
            infer_filename("https://example.com/a%2Fb.jpg"),
            "a%2Fb.jpg"
        );
    }

    #[test]
    fn test_infer_filename_trailing_slash() {
        assert_eq!(infer_filename("https://example.com/images/"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_infer_filename_empty() {
        assert_eq!(infer_filename(""), FALLBACK_FILENAME);
    }
}
