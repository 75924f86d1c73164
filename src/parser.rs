//! Payload parsing: VQD token extraction, result-page JSON, page scraping.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{ImageResult, ImageSearchError, Result};

static VQD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"vqd=['"]([a-zA-Z0-9-]+)['"]"#).expect("VQD regex is valid")
});

/// One parsed page of the image endpoint's JSON payload.
#[derive(Debug, Clone)]
pub struct ResultsPage {
    /// Results that survived per-record validation, in source order.
    pub results: Vec<ImageResult>,
    /// Number of raw records on the page, including skipped ones.
    ///
    /// The endpoint's offset counts raw records, so pagination must advance
    /// by this rather than by `results.len()`.
    pub raw_len: usize,
    /// Whether the payload advertises a further page.
    pub has_next: bool,
}

/// Extracts the VQD session token from the search landing page.
pub fn extract_vqd(html: &str) -> Result<String> {
    VQD_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| {
            ImageSearchError::VqdToken("token not found in landing page".to_string())
        })
}

/// Parses one raw payload from the image endpoint.
///
/// A record that fails to deserialize, or that carries an empty `image` URL,
/// is skipped; only an unrecognized payload as a whole is an error.
pub fn parse_results_page(raw: &str) -> Result<ResultsPage> {
    let payload: Value = serde_json::from_str(raw)
        .map_err(|e| ImageSearchError::Parse(format!("invalid JSON payload: {e}")))?;

    let records = payload
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ImageSearchError::Parse("payload has no 'results' array".to_string())
        })?;

    let raw_len = records.len();
    let mut results = Vec::with_capacity(raw_len);

    for record in records {
        match serde_json::from_value::<ImageResult>(record.clone()) {
            Ok(result) if !result.image_url.is_empty() => results.push(result),
            Ok(_) => debug!("skipping record with empty image URL"),
            Err(e) => debug!("skipping malformed record: {e}"),
        }
    }

    Ok(ResultsPage {
        results,
        raw_len,
        has_next: payload.get("next").is_some(),
    })
}

/// Extracts all absolute image URLs from an HTML page.
///
/// Relative `src` attributes are resolved against `base_url`; ones that
/// cannot be resolved are dropped.
pub fn extract_page_images(html: &str, base_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url)?;
    let document = Html::parse_document(html);
    let img_selector = Selector::parse("img")
        .map_err(|e| ImageSearchError::Parse(format!("Failed to parse selector: {e:?}")))?;

    let urls = document
        .select(&img_selector)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .filter_map(|src| base.join(src).ok())
        .map(String::from)
        .collect();

    Ok(urls)
}
