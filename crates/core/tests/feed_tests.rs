use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stock_dashboard_core::errors::DashboardError;
use stock_dashboard_core::feeds::cache::FeedCache;
use stock_dashboard_core::feeds::service::FeedService;
use stock_dashboard_core::feeds::traits::FeedFetcher;
use stock_dashboard_core::models::feed::{FeedKind, FeedStatus, FeedTable};

// ═══════════════════════════════════════════════════════════════════
// Mock Fetcher (canned bodies per URL, counts round trips)
// ═══════════════════════════════════════════════════════════════════

struct MockFetcher {
    bodies: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            failures: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.failures.insert(url.into(), message.into());
        self
    }

    fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl FeedFetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, DashboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.get(url) {
            return Err(DashboardError::Network(message.clone()));
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| DashboardError::Network(format!("no canned body for {url}")))
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FeedTable::parse_csv
// ═══════════════════════════════════════════════════════════════════

mod parse_csv {
    use super::*;

    #[test]
    fn basic_table() {
        let table = FeedTable::parse_csv("code,value\n0050,100\n2330,200").unwrap();
        assert_eq!(table.headers(), &["code", "value"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 0), "0050");
        assert_eq!(table.cell(1, 1), "200");
    }

    #[test]
    fn strips_byte_order_mark() {
        let table = FeedTable::parse_csv("\u{feff}code,value\n0050,100").unwrap();
        assert_eq!(table.headers()[0], "code");
        assert_eq!(table.column_index("code"), Some(0));
    }

    #[test]
    fn trims_header_whitespace() {
        let table = FeedTable::parse_csv(" code , value \n0050,100").unwrap();
        assert_eq!(table.headers(), &["code", "value"]);
        assert!(table.has_column("value"));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let table = FeedTable::parse_csv("a,b,c\n1,2").unwrap();
        assert_eq!(table.cell(0, 0), "1");
        assert_eq!(table.cell(0, 1), "2");
        assert_eq!(table.cell(0, 2), "");
    }

    #[test]
    fn long_rows_are_cut_at_header_width() {
        let table = FeedTable::parse_csv("a,b\n1,2,3,4").unwrap();
        assert_eq!(table.cell(0, 0), "1");
        assert_eq!(table.cell(0, 1), "2");
        assert_eq!(table.cell(0, 2), "");
    }

    #[test]
    fn quoted_commas_stay_in_one_cell() {
        let table = FeedTable::parse_csv("code,note\n0050,\"hello, world\"").unwrap();
        assert_eq!(table.cell(0, 1), "hello, world");
    }

    #[test]
    fn headers_only_is_an_empty_table() {
        let table = FeedTable::parse_csv("code,value").unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_body_is_rejected() {
        match FeedTable::parse_csv("") {
            Err(DashboardError::Tabular(msg)) => assert!(msg.contains("empty")),
            other => panic!("expected Tabular error, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_body_is_rejected() {
        assert!(matches!(
            FeedTable::parse_csv("   \n  "),
            Err(DashboardError::Tabular(_))
        ));
    }

    #[test]
    fn html_login_page_is_rejected() {
        let html = "<HTML><body>Sign in to continue</body></HTML>";
        match FeedTable::parse_csv(html) {
            Err(DashboardError::Tabular(msg)) => assert!(msg.contains("HTML")),
            other => panic!("expected Tabular error, got {other:?}"),
        }
    }

    #[test]
    fn doctype_page_is_rejected() {
        let html = "<!DOCTYPE html><html><head></head></html>";
        assert!(matches!(
            FeedTable::parse_csv(html),
            Err(DashboardError::Tabular(_))
        ));
    }

    #[test]
    fn blank_header_row_is_rejected() {
        assert!(matches!(
            FeedTable::parse_csv(",,\n1,2,3"),
            Err(DashboardError::Tabular(_))
        ));
    }

    #[test]
    fn out_of_range_cell_reads_empty() {
        let table = FeedTable::parse_csv("a\n1").unwrap();
        assert_eq!(table.cell(5, 0), "");
        assert_eq!(table.cell(0, 5), "");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FeedStatus combinators
// ═══════════════════════════════════════════════════════════════════

mod feed_status {
    use super::*;

    #[test]
    fn map_transforms_ready() {
        let status = FeedStatus::Ready(2).map(|n| n * 10);
        assert_eq!(status, FeedStatus::Ready(20));
    }

    #[test]
    fn map_passes_unavailable_through() {
        let status: FeedStatus<i32> = FeedStatus::Unavailable("down".into());
        let mapped = status.map(|n| n * 10);
        assert_eq!(mapped, FeedStatus::Unavailable("down".into()));
    }

    #[test]
    fn and_then_chains_ready() {
        let status = FeedStatus::Ready(2).and_then(|n| FeedStatus::Ready(n + 1));
        assert_eq!(status, FeedStatus::Ready(3));
    }

    #[test]
    fn and_then_can_come_up_unavailable() {
        let status: FeedStatus<i32> =
            FeedStatus::Ready(2).and_then(|_| FeedStatus::Unavailable("broken".into()));
        assert_eq!(status, FeedStatus::Unavailable("broken".into()));
    }

    #[test]
    fn and_then_short_circuits_unavailable() {
        let status: FeedStatus<i32> = FeedStatus::Unavailable("down".into());
        let chained = status.and_then(|n| FeedStatus::Ready(n + 1));
        assert_eq!(chained, FeedStatus::Unavailable("down".into()));
    }

    #[test]
    fn ready_and_as_ready() {
        let status = FeedStatus::Ready(7);
        assert_eq!(status.as_ready(), Some(&7));
        assert_eq!(status.ready(), Some(7));

        let gone: FeedStatus<i32> = FeedStatus::Unavailable("down".into());
        assert_eq!(gone.as_ready(), None);
        assert_eq!(gone.ready(), None);
    }

    #[test]
    fn state_predicates() {
        let ready = FeedStatus::Ready(1);
        assert!(ready.is_ready());
        assert!(!ready.is_unavailable());
        assert_eq!(ready.unavailable_reason(), None);

        let down: FeedStatus<i32> = FeedStatus::Unavailable("reason".into());
        assert!(down.is_unavailable());
        assert_eq!(down.unavailable_reason(), Some("reason"));
    }

    #[test]
    fn unavailable_is_not_an_empty_table() {
        let empty = FeedStatus::Ready(FeedTable::parse_csv("code").unwrap());
        let down: FeedStatus<FeedTable> = FeedStatus::Unavailable("down".into());
        assert!(empty.is_ready());
        assert!(down.is_unavailable());
        assert_ne!(empty, down);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FeedCache
// ═══════════════════════════════════════════════════════════════════

mod cache {
    use super::*;

    #[test]
    fn fresh_entry_is_served() {
        let mut cache = FeedCache::new();
        cache.insert("https://example.com/a", "body".into());
        assert_eq!(
            cache.get("https://example.com/a", Duration::from_secs(60)),
            Some("body")
        );
    }

    #[test]
    fn zero_ttl_never_serves() {
        let mut cache = FeedCache::new();
        cache.insert("https://example.com/a", "body".into());
        assert_eq!(cache.get("https://example.com/a", Duration::ZERO), None);
    }

    #[test]
    fn unknown_url_misses() {
        let cache = FeedCache::new();
        assert_eq!(cache.get("https://example.com/a", Duration::from_secs(60)), None);
    }

    #[test]
    fn insert_overwrites() {
        let mut cache = FeedCache::new();
        cache.insert("https://example.com/a", "old".into());
        cache.insert("https://example.com/a", "new".into());
        assert_eq!(
            cache.get("https://example.com/a", Duration::from_secs(60)),
            Some("new")
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_drops_one_url() {
        let mut cache = FeedCache::new();
        cache.insert("https://example.com/a", "a".into());
        cache.insert("https://example.com/b", "b".into());
        cache.invalidate("https://example.com/a");

        assert_eq!(cache.get("https://example.com/a", Duration::from_secs(60)), None);
        assert_eq!(
            cache.get("https://example.com/b", Duration::from_secs(60)),
            Some("b")
        );
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = FeedCache::new();
        cache.insert("https://example.com/a", "a".into());
        cache.insert("https://example.com/b", "b".into());
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FeedService
// ═══════════════════════════════════════════════════════════════════

mod service {
    use super::*;

    const URL: &str = "https://example.com/holdings";

    #[tokio::test]
    async fn parses_a_healthy_feed() {
        let fetcher = MockFetcher::new().with_body(URL, "code,value\n0050,100");
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        let status = service.load(FeedKind::Holdings, URL).await;
        let table = status.ready().expect("feed should be ready");
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 0), "0050");
    }

    #[tokio::test]
    async fn fetch_failure_names_the_feed() {
        let fetcher = MockFetcher::new().with_failure(URL, "connection refused");
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        let status = service.load(FeedKind::Holdings, URL).await;
        let reason = status.unavailable_reason().expect("feed should be down");
        assert!(reason.contains("holdings feed unavailable"));
        assert!(reason.contains("connection refused"));
    }

    #[tokio::test]
    async fn second_load_inside_ttl_reuses_the_body() {
        let fetcher = MockFetcher::new().with_body(URL, "code\n0050");
        let calls = fetcher.call_counter();
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_ttl_refetches_every_time() {
        let fetcher = MockFetcher::new().with_body(URL, "code\n0050");
        let calls = fetcher.call_counter();
        let mut service = FeedService::new(Box::new(fetcher), Duration::ZERO);

        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_all_forces_a_refetch() {
        let fetcher = MockFetcher::new().with_body(URL, "code\n0050");
        let calls = fetcher.call_counter();
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        service.invalidate_all();
        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_tabular_body_is_unavailable_and_not_cached() {
        let fetcher =
            MockFetcher::new().with_body(URL, "<html><body>please sign in</body></html>");
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        let status = service.load(FeedKind::Holdings, URL).await;
        assert!(status.is_unavailable());
        assert_eq!(service.cached_feeds(), 0);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let fetcher = MockFetcher::new().with_failure(URL, "boom");
        let calls = fetcher.call_counter();
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        assert!(service.load(FeedKind::Holdings, URL).await.is_unavailable());
        assert!(service.load(FeedKind::Holdings, URL).await.is_unavailable());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.cached_feeds(), 0);
    }

    #[tokio::test]
    async fn urls_are_cached_independently() {
        let other = "https://example.com/dividends";
        let fetcher = MockFetcher::new()
            .with_body(URL, "code\n0050")
            .with_body(other, "code\n2330");
        let calls = fetcher.call_counter();
        let mut service = FeedService::new(Box::new(fetcher), Duration::from_secs(60));

        assert!(service.load(FeedKind::Holdings, URL).await.is_ready());
        assert!(service.load(FeedKind::Dividends, other).await.is_ready());
        assert_eq!(service.cached_feeds(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
