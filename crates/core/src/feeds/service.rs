use std::time::Duration;

use tracing::{debug, warn};

use crate::models::feed::{FeedKind, FeedStatus, FeedTable};

use super::cache::FeedCache;
use super::traits::FeedFetcher;

/// Loads feeds through the cache and turns every failure into an
/// inspectable status, so one broken feed never takes down the rest of
/// a render pass.
pub struct FeedService {
    fetcher: Box<dyn FeedFetcher>,
    cache: FeedCache,
    ttl: Duration,
}

impl FeedService {
    pub fn new(fetcher: Box<dyn FeedFetcher>, ttl: Duration) -> Self {
        Self {
            fetcher,
            cache: FeedCache::new(),
            ttl,
        }
    }

    /// Load and parse one feed. Network, HTTP-status and parse failures
    /// all come back as `Unavailable` with a message naming the feed.
    pub async fn load(&mut self, kind: FeedKind, url: &str) -> FeedStatus<FeedTable> {
        let body = match self.cache.get(url, self.ttl) {
            Some(cached) => {
                debug!(feed = kind.label(), "feed served from cache");
                cached.to_string()
            }
            None => match self.fetcher.fetch_text(url).await {
                Ok(fresh) => {
                    self.cache.insert(url, fresh.clone());
                    fresh
                }
                Err(e) => {
                    warn!(feed = kind.label(), error = %e, "feed fetch failed");
                    return FeedStatus::Unavailable(format!(
                        "{} feed unavailable: {e}",
                        kind.label()
                    ));
                }
            },
        };

        match FeedTable::parse_csv(&body) {
            Ok(table) => FeedStatus::Ready(table),
            Err(e) => {
                // A body that does not parse is not worth serving again
                // for the rest of its TTL.
                warn!(feed = kind.label(), error = %e, "feed body is not tabular");
                self.cache.invalidate(url);
                FeedStatus::Unavailable(format!("{} feed unavailable: {e}", kind.label()))
            }
        }
    }

    /// Forget every cached body; the next load re-fetches.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Number of feed bodies currently cached.
    #[must_use]
    pub fn cached_feeds(&self) -> usize {
        self.cache.len()
    }
}
