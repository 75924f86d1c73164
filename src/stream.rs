//! Lazy result stream over a paginated query execution.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};

use crate::paginator::Paginator;
use crate::{ImageResult, Result};

/// A lazily-produced, finite, non-restartable sequence of [`ImageResult`].
///
/// Polling the stream drives the underlying paginator one page at a time;
/// nothing is fetched until the first poll, and dropping the stream cancels
/// the execution with no work left in flight.
pub struct ImageStream {
    inner: BoxStream<'static, Result<ImageResult>>,
}

impl ImageStream {
    pub(crate) fn new(paginator: Paginator) -> Self {
        let pages = stream::try_unfold(paginator, |mut paginator| async move {
            let batch = paginator.next_page().await?;
            Ok::<_, crate::ImageSearchError>(batch.map(|batch| (batch, paginator)))
        });
        let inner = pages
            .map_ok(|batch| stream::iter(batch.into_iter().map(Ok)))
            .try_flatten()
            .boxed();
        Self { inner }
    }

    /// Collects the remaining results, stopping at the first error.
    pub async fn collect_results(self) -> Result<Vec<ImageResult>> {
        self.inner.try_collect().await
    }
}

impl Stream for ImageStream {
    type Item = Result<ImageResult>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}
