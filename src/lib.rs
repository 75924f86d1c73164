//! # ddgimage
//!
//! An asynchronous DuckDuckGo image search client.
//!
//! This library drives the image endpoint's paginated search as a lazy,
//! cancellable stream of typed results, with support for:
//!
//! - Region, safe search and image filters (time, size, color, type, layout,
//!   license)
//! - Scraping image URLs off arbitrary webpages
//! - Downloading result images to disk
//!
//! ## Example
//!
//! ```rust,no_run
//! use ddgimage::{Client, ImageQuery};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::new();
//!     let query = ImageQuery::new("red panda").with_max_results(5);
//!
//!     let mut results = client.search(query);
//!     while let Some(result) = results.next().await {
//!         let result = result?;
//!         println!("{}: {}", result.title, result.image_url);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod paginator;
mod parser;
mod query;
mod result;
mod stream;
mod transport;

pub use client::{Client, ClientBuilder};
pub use error::{ImageSearchError, Result};
pub use parser::{extract_page_images, parse_results_page, ResultsPage};
pub use query::{ImageLayout, ImageQuery, ImageSize, ImageType, SafeSearch, TimeLimit};
pub use result::ImageResult;
pub use stream::ImageStream;
pub use transport::{HttpTransport, Transport};
