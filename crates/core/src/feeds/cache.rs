use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

/// Keyed cache of raw feed bodies with a time-to-live.
///
/// Repeated renders inside the TTL reuse one network round trip; the
/// explicit refresh action clears the cache so the next render
/// re-fetches everything. One render runs at a time, so no locking.
#[derive(Debug, Default)]
pub struct FeedCache {
    entries: HashMap<String, CacheEntry>,
}

impl FeedCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached body for `url`, if it is still fresh.
    #[must_use]
    pub fn get(&self, url: &str, ttl: Duration) -> Option<&str> {
        self.entries
            .get(url)
            .filter(|e| e.fetched_at.elapsed() < ttl)
            .map(|e| e.body.as_str())
    }

    /// Store a freshly fetched body.
    pub fn insert(&mut self, url: &str, body: String) {
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop one URL's entry.
    pub fn invalidate(&mut self, url: &str) {
        self.entries.remove(url);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
