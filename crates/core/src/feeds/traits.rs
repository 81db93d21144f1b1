use async_trait::async_trait;

use crate::errors::DashboardError;

/// Trait abstraction over the HTTP fetch of a published feed.
///
/// The real implementation does a GET and returns the body text; tests
/// swap in a canned fetcher. Everything above this seam is synchronous
/// and pure.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the raw delimited-text body at `url`.
    async fn fetch_text(&self, url: &str) -> Result<String, DashboardError>;
}
