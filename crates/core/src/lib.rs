pub mod errors;
pub mod feeds;
pub mod models;
pub mod services;
pub mod writeback;

use std::time::Duration;

use chrono::NaiveDate;

use errors::DashboardError;
use feeds::http::HttpFeedFetcher;
use feeds::service::FeedService;
use feeds::traits::FeedFetcher;
use models::{
    announcement::{ActivityEvent, Announcement},
    dividend::DividendStatus,
    feed::{FeedKind, FeedStatus, FeedTable},
    holding::HoldingsReport,
    names::StockNameMap,
    session::Session,
    settings::Settings,
    snapshot::{DashboardSnapshot, StockDetail},
};
use services::bulletin_service::BulletinService;
use services::detail_service::DetailService;
use services::holdings_service::HoldingsService;
use services::normalize::normalize_code;
use writeback::action::{WriteAction, WriteReceipt};
use writeback::client::{HttpWriteTransport, WriteClient, WriteTransport};

/// Wrap a service result as a per-feed status, naming the feed in the
/// failure message.
fn feed_status_from<T>(kind: FeedKind, result: Result<T, DashboardError>) -> FeedStatus<T> {
    match result {
        Ok(value) => FeedStatus::Ready(value),
        Err(e) => FeedStatus::Unavailable(format!("{} feed unavailable: {e}", kind.label())),
    }
}

/// Main entry point for the stock dashboard core library.
/// Owns the configuration, the feed pipeline, the session state and the
/// write client; the renderer drives it one interaction at a time.
#[must_use]
pub struct StockDashboard {
    settings: Settings,
    feed_service: FeedService,
    holdings_service: HoldingsService,
    detail_service: DetailService,
    bulletin_service: BulletinService,
    write_client: WriteClient,
    session: Session,
    /// Codes of the last aggregated holdings table, in display order.
    last_codes: Vec<String>,
}

impl std::fmt::Debug for StockDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockDashboard")
            .field("session", &self.session)
            .field("cached_feeds", &self.feed_service.cached_feeds())
            .field("held_stocks", &self.last_codes.len())
            .finish()
    }
}

impl StockDashboard {
    /// Build a dashboard talking to the real HTTP endpoints.
    pub fn new(settings: Settings) -> Result<Self, DashboardError> {
        settings.validate()?;
        Ok(Self::build(
            settings,
            Box::new(HttpFeedFetcher::new()),
            Box::new(HttpWriteTransport::new()),
        ))
    }

    /// Build a dashboard with custom transports (tests, offline use).
    pub fn with_transports(
        settings: Settings,
        fetcher: Box<dyn FeedFetcher>,
        transport: Box<dyn WriteTransport>,
    ) -> Result<Self, DashboardError> {
        settings.validate()?;
        Ok(Self::build(settings, fetcher, transport))
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Run one full render pass: load every feed, aggregate the
    /// holdings, reconcile the selection and assemble the drill-down.
    ///
    /// Infallible on purpose. Every feed failure arrives inside the
    /// snapshot as an `Unavailable` status for the renderer to show;
    /// one broken feed leaves the others intact.
    pub async fn render(&mut self) -> DashboardSnapshot {
        let holdings = self.holdings_report().await;

        // The selection is keyed by code; re-resolve it against the
        // fresh table. When the holdings feed itself is down the table
        // was not recomputed and the selection stands.
        if let FeedStatus::Ready(report) = &holdings {
            self.last_codes = report.codes();
            self.session.selection.reconcile(&self.last_codes);
        }

        let stock_names = self.stock_names().await;
        let announcements = self.announcements().await;
        let recent_activity = self.recent_activity().await;

        let selected = self.session.selection.code().map(str::to_string);
        let detail = match selected {
            Some(code) => Some(self.load_detail(&code, &stock_names).await),
            None => None,
        };

        DashboardSnapshot {
            holdings,
            stock_names,
            announcements,
            recent_activity,
            detail,
        }
    }

    /// Clear the feed cache, then render. The explicit refresh action
    /// bypasses the cache TTL.
    pub async fn refresh(&mut self) -> DashboardSnapshot {
        self.feed_service.invalidate_all();
        self.render().await
    }

    // ── Granular loads ──────────────────────────────────────────────

    /// Load and aggregate the holdings feed on its own.
    pub async fn holdings_report(&mut self) -> FeedStatus<HoldingsReport> {
        let status = self.load_table(FeedKind::Holdings).await;
        status.and_then(|table| {
            feed_status_from(FeedKind::Holdings, self.holdings_service.aggregate(&table))
        })
    }

    /// Load the stock-name map on its own.
    pub async fn stock_names(&mut self) -> FeedStatus<StockNameMap> {
        let status = self.load_table(FeedKind::StockNames).await;
        status.and_then(|table| {
            feed_status_from(FeedKind::StockNames, StockNameMap::from_table(&table))
        })
    }

    /// Load and parse the announcements board on its own.
    pub async fn announcements(&mut self) -> FeedStatus<Vec<Announcement>> {
        let status = self.load_table(FeedKind::Announcements).await;
        status.and_then(|table| {
            feed_status_from(
                FeedKind::Announcements,
                self.bulletin_service.announcements(&table),
            )
        })
    }

    /// Load the recent-activity timeline as of today.
    pub async fn recent_activity(&mut self) -> FeedStatus<Vec<ActivityEvent>> {
        let today = chrono::Utc::now().date_naive();
        self.recent_activity_as_of(today).await
    }

    /// Load the recent-activity timeline with an explicit reference
    /// date for the rolling window.
    pub async fn recent_activity_as_of(
        &mut self,
        today: NaiveDate,
    ) -> FeedStatus<Vec<ActivityEvent>> {
        let window = self.settings.activity_window_days;
        let status = self.load_table(FeedKind::RecentActivity).await;
        status.and_then(|table| {
            feed_status_from(
                FeedKind::RecentActivity,
                self.bulletin_service.recent_activity(&table, today, window),
            )
        })
    }

    /// Assemble the drill-down panel for one stock without a full
    /// render pass.
    pub async fn stock_detail(&mut self, code: &str) -> StockDetail {
        let code = normalize_code(code);
        let names = self.stock_names().await;
        self.load_detail(&code, &names).await
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Select the holdings row at `index` in the table current as of
    /// the last render, and return its code. The selection itself
    /// stores the code, so a later reorder of the table keeps the
    /// drill-down on the same instrument.
    pub fn select_row(&mut self, index: usize) -> Result<String, DashboardError> {
        let code = self.last_codes.get(index).cloned().ok_or_else(|| {
            DashboardError::Validation(format!(
                "row index {index} is out of range for a table of {} holdings",
                self.last_codes.len()
            ))
        })?;
        self.session.selection.select(code.clone());
        Ok(code)
    }

    /// Select a stock directly by code.
    pub fn select_code(&mut self, code: &str) {
        self.session.selection.select(normalize_code(code));
    }

    /// Drop the drill-down focus.
    pub fn clear_selection(&mut self) {
        self.session.selection.clear();
    }

    /// The code currently in focus, if any.
    #[must_use]
    pub fn selected_code(&self) -> Option<&str> {
        self.session.selection.code()
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Try the access password. Returns whether it matched; on a match
    /// the session is authenticated.
    pub fn login(&mut self, password: &str) -> bool {
        let ok = password == self.settings.access_password;
        if ok {
            self.session.authenticated = true;
        }
        ok
    }

    /// End the session: drop authentication, close the admin panel and
    /// clear the selection.
    pub fn logout(&mut self) {
        self.session = Session::new();
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Try the admin password. Returns whether it matched; on a match
    /// the data-entry panel opens.
    pub fn open_admin_panel(&mut self, password: &str) -> bool {
        let ok = password == self.settings.admin_password;
        if ok {
            self.session.admin_panel_open = true;
        }
        ok
    }

    pub fn close_admin_panel(&mut self) {
        self.session.admin_panel_open = false;
    }

    #[must_use]
    pub fn is_admin_panel_open(&self) -> bool {
        self.session.admin_panel_open
    }

    /// Read-only view of the whole session state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── Data entry (write-back) ─────────────────────────────────────

    /// Post a dated announcement.
    pub async fn post_announcement(
        &self,
        date: &str,
        category: &str,
        message: &str,
    ) -> Result<WriteReceipt, DashboardError> {
        self.write_client
            .submit(WriteAction::AddAnnouncement {
                date: date.to_string(),
                category: category.to_string(),
                message: message.to_string(),
            })
            .await
    }

    /// Record incoming funds.
    pub async fn record_inflow(
        &self,
        date: &str,
        amount: f64,
        note: &str,
    ) -> Result<WriteReceipt, DashboardError> {
        self.write_client
            .submit(WriteAction::AddInflow {
                date: date.to_string(),
                amount,
                note: note.to_string(),
            })
            .await
    }

    /// Record a trade. The code is canonicalized before submission so
    /// the sheet joins it with the holdings rows.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_trade(
        &self,
        code: &str,
        date: &str,
        kind: &str,
        unit_price: f64,
        shares: f64,
        fee: f64,
        invested: f64,
    ) -> Result<WriteReceipt, DashboardError> {
        self.write_client
            .submit(WriteAction::AddTrade {
                code: normalize_code(code),
                date: date.to_string(),
                kind: kind.to_string(),
                unit_price,
                shares,
                fee,
                invested,
            })
            .await
    }

    /// Register or update the display name for a code.
    pub async fn upsert_stock_name(
        &self,
        code: &str,
        name: &str,
    ) -> Result<WriteReceipt, DashboardError> {
        self.write_client
            .submit(WriteAction::UpsertStockName {
                code: normalize_code(code),
                name: name.to_string(),
            })
            .await
    }

    /// Record a dividend payout.
    pub async fn record_dividend(
        &self,
        code: &str,
        season: &str,
        date: &str,
        per_share: f64,
        amount: f64,
    ) -> Result<WriteReceipt, DashboardError> {
        self.write_client
            .submit(WriteAction::AddDividend {
                code: normalize_code(code),
                season: season.to_string(),
                date: date.to_string(),
                per_share,
                amount,
            })
            .await
    }

    /// Update the status of an existing dividend entry.
    pub async fn update_dividend_status(
        &self,
        code: &str,
        season: &str,
        status: DividendStatus,
    ) -> Result<WriteReceipt, DashboardError> {
        self.write_client
            .submit(WriteAction::UpdateDividendStatus {
                code: normalize_code(code),
                season: season.to_string(),
                status: status.label().to_string(),
            })
            .await
    }

    // ── Cache & Settings ────────────────────────────────────────────

    /// Number of feed bodies currently cached.
    #[must_use]
    pub fn cached_feeds(&self) -> usize {
        self.feed_service.cached_feeds()
    }

    /// Forget every cached feed body without rendering.
    pub fn invalidate_feeds(&mut self) {
        self.feed_service.invalidate_all();
    }

    /// Current configuration.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn load_table(&mut self, kind: FeedKind) -> FeedStatus<FeedTable> {
        let url = self.settings.feed_url(kind);
        self.feed_service.load(kind, url).await
    }

    async fn load_detail(
        &mut self,
        code: &str,
        names: &FeedStatus<StockNameMap>,
    ) -> StockDetail {
        let status = self.load_table(FeedKind::Transactions).await;
        let transactions = status.and_then(|table| {
            feed_status_from(
                FeedKind::Transactions,
                self.detail_service.transactions_for(&table, code),
            )
        });

        let status = self.load_table(FeedKind::Dividends).await;
        let dividends = status.and_then(|table| {
            let result = self
                .detail_service
                .dividends_for(&table, code)
                .map(|mut rows| {
                    self.detail_service.sort_dividends_newest_first(&mut rows);
                    rows
                });
            feed_status_from(FeedKind::Dividends, result)
        });

        let label = match names.as_ready() {
            Some(map) => map.display_label(code),
            None => code.to_string(),
        };

        StockDetail {
            code: code.to_string(),
            label,
            transactions,
            dividends,
        }
    }

    fn build(
        settings: Settings,
        fetcher: Box<dyn FeedFetcher>,
        transport: Box<dyn WriteTransport>,
    ) -> Self {
        let ttl = Duration::from_secs(settings.cache_ttl_secs);
        let feed_service = FeedService::new(fetcher, ttl);
        let write_client = WriteClient::new(transport, settings.write_endpoint_url.clone());

        Self {
            settings,
            feed_service,
            holdings_service: HoldingsService::new(),
            detail_service: DetailService::new(),
            bulletin_service: BulletinService::new(),
            write_client,
            session: Session::new(),
            last_codes: Vec::new(),
        }
    }
}
