//! Error types for the image search library.

use thiserror::Error;

/// Result type alias for image search operations.
pub type Result<T> = std::result::Result<T, ImageSearchError>;

/// Errors that can occur during search, scrape and download operations.
#[derive(Error, Debug)]
pub enum ImageSearchError {
    /// HTTP request failed or timed out.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response payload as a whole was unrecognized.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The VQD session token could not be extracted from the landing page.
    #[error("Failed to extract VQD token: {0}")]
    VqdToken(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Filesystem error while writing a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
