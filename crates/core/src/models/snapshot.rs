use serde::{Deserialize, Serialize};

use super::announcement::{ActivityEvent, Announcement};
use super::dividend::Dividend;
use super::feed::FeedStatus;
use super::holding::HoldingsReport;
use super::names::StockNameMap;
use super::transaction::Transaction;

/// Drill-down panel for one selected stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    /// Canonical code of the stock in focus
    pub code: String,

    /// Code decorated with its display name, for the panel heading
    pub label: String,

    /// Trades for this stock, feed order preserved
    pub transactions: FeedStatus<Vec<Transaction>>,

    /// Dividends for this stock, newest payout first
    pub dividends: FeedStatus<Vec<Dividend>>,
}

/// Everything one render pass hands to the renderer.
///
/// Each feed arrives as its own status; one unavailable feed leaves the
/// others intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Aggregated holdings table and portfolio totals
    pub holdings: FeedStatus<HoldingsReport>,

    /// Code to display-name map
    pub stock_names: FeedStatus<StockNameMap>,

    /// Announcement board entries, feed order preserved
    pub announcements: FeedStatus<Vec<Announcement>>,

    /// Timeline events inside the rolling window, newest first
    pub recent_activity: FeedStatus<Vec<ActivityEvent>>,

    /// Present when a stock is selected
    pub detail: Option<StockDetail>,
}
