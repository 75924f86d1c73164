//! Paginated query driver for the image endpoint.
//!
//! One `Paginator` backs one query execution: it obtains the VQD session
//! token, then walks the endpoint's offset-based pages until the result
//! target is met or the source is exhausted.

use std::sync::Arc;

use tracing::debug;

use crate::parser;
use crate::transport::Transport;
use crate::{ImageQuery, ImageResult, ImageSearchError, Result};

const LANDING_URL: &str = "https://duckduckgo.com/";
const IMAGES_URL: &str = "https://duckduckgo.com/i.js";

/// Driver state, kept explicit so termination is testable on its own.
///
/// `Fetching` carries the page cursor: the raw-record offset the endpoint
/// expects in its `s` parameter. The cursor never leaves this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    /// No request issued yet; the session token is still needed.
    Start,
    /// Ready to request the page at the given raw-record offset.
    Fetching { offset: usize },
    /// Terminal: target met, source exhausted, or a prior error.
    Done,
}

/// Drives one query execution, one page per call.
pub struct Paginator {
    transport: Arc<dyn Transport>,
    query: ImageQuery,
    vqd: Option<String>,
    state: DriverState,
    yielded: usize,
}

impl Paginator {
    /// Creates a driver for the given query. No request is issued until the
    /// first [`next_page`](Self::next_page) call.
    pub fn new(transport: Arc<dyn Transport>, query: ImageQuery) -> Self {
        Self {
            transport,
            query,
            vqd: None,
            state: DriverState::Start,
            yielded: 0,
        }
    }

    /// Fetches and parses the next page of results.
    ///
    /// Returns `Ok(None)` once the driver is exhausted. A driver that has
    /// returned an error is parked and yields `Ok(None)` from then on.
    pub async fn next_page(&mut self) -> Result<Option<Vec<ImageResult>>> {
        if self.state == DriverState::Done {
            return Ok(None);
        }
        match self.advance().await {
            Ok(batch) => Ok(batch),
            Err(e) => {
                self.state = DriverState::Done;
                Err(e)
            }
        }
    }

    async fn advance(&mut self) -> Result<Option<Vec<ImageResult>>> {
        let offset = match self.state {
            DriverState::Start => {
                if self.query.keywords.trim().is_empty() {
                    return Err(ImageSearchError::InvalidQuery(
                        "keywords cannot be empty".into(),
                    ));
                }
                self.fetch_vqd().await?;
                self.state = DriverState::Fetching { offset: 0 };
                0
            }
            DriverState::Fetching { offset } => offset,
            DriverState::Done => return Ok(None),
        };

        let page = self.fetch_page(offset).await?;
        debug!(
            offset,
            parsed = page.results.len(),
            raw = page.raw_len,
            has_next = page.has_next,
            "fetched results page"
        );

        // A page contributing nothing new means an exhausted or blocking
        // source; stop rather than loop on it.
        if page.results.is_empty() {
            self.state = DriverState::Done;
            return Ok(None);
        }

        let mut batch = page.results;
        if let Some(max) = self.query.max_results {
            let remaining = max.saturating_sub(self.yielded);
            batch.truncate(remaining);
        }
        if batch.is_empty() {
            self.state = DriverState::Done;
            return Ok(None);
        }
        self.yielded += batch.len();

        let target_met = self
            .query
            .max_results
            .is_some_and(|max| self.yielded >= max);
        self.state = if target_met || !page.has_next {
            DriverState::Done
        } else {
            DriverState::Fetching {
                offset: offset + page.raw_len,
            }
        };

        Ok(Some(batch))
    }

    async fn fetch_vqd(&mut self) -> Result<()> {
        let form = [("q", self.query.keywords.clone())];
        let body = self.transport.post_form(LANDING_URL, &form).await?;
        self.vqd = Some(parser::extract_vqd(&body)?);
        Ok(())
    }

    async fn fetch_page(&self, offset: usize) -> Result<parser::ResultsPage> {
        // fetch_vqd always precedes the first page fetch
        let vqd = self.vqd.clone().unwrap_or_default();
        let params = [
            ("l", self.query.region.clone()),
            ("o", "json".to_string()),
            ("q", self.query.keywords.clone()),
            ("s", offset.to_string()),
            ("p", self.query.safesearch.param().to_string()),
            ("f", self.query.filter_param()),
            ("vqd", vqd),
        ];
        let body = self.transport.get(IMAGES_URL, &params).await?;
        parser::parse_results_page(&body)
    }
}
