use serde::{Deserialize, Serialize};

/// One aggregated holdings row: a currently-owned instrument with its
/// cleaned cost, valuation and gain figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Canonical stock code (zero-padded to at least 4 characters)
    pub code: String,

    /// Total capital put into this instrument
    pub cost_basis: f64,

    /// Current market value of the position
    pub market_value: f64,

    /// Unrealized gain/loss as carried by the feed
    pub unrealized_gain: f64,

    /// Accumulated share count (always > 0 after aggregation)
    pub shares: f64,

    /// Average cost per share
    pub avg_cost: f64,

    /// Latest price per share
    pub current_price: f64,
}

/// Portfolio-level totals derived from the aggregated rows.
/// Never stored; recomputed on every aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of cost basis across all holdings
    pub total_cost: f64,

    /// Sum of market value across all holdings
    pub total_value: f64,

    /// total_value - total_cost
    pub total_profit: f64,

    /// Percentage return; 0 when nothing is invested (no division error)
    pub roi_pct: f64,
}

impl PortfolioTotals {
    /// Derive totals from aggregated holdings rows.
    #[must_use]
    pub fn from_rows(rows: &[Holding]) -> Self {
        let total_cost: f64 = rows.iter().map(|r| r.cost_basis).sum();
        let total_value: f64 = rows.iter().map(|r| r.market_value).sum();
        let total_profit = total_value - total_cost;
        let roi_pct = if total_cost > 0.0 {
            total_profit / total_cost * 100.0
        } else {
            0.0
        };

        Self {
            total_cost,
            total_value,
            total_profit,
            roi_pct,
        }
    }
}

/// Output of one holdings aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsReport {
    /// Cleaned per-stock rows, feed order preserved
    pub rows: Vec<Holding>,

    /// Derived portfolio totals
    pub totals: PortfolioTotals,

    /// True when at least one row had its market value substituted from
    /// cost basis because the price was missing from the feed. The
    /// renderer warns the user that the valuation is approximate.
    pub price_approximated: bool,
}

impl HoldingsReport {
    /// Codes of all rows, in display order.
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.code.clone()).collect()
    }

    /// The row for a canonical code, if held.
    #[must_use]
    pub fn row_for(&self, code: &str) -> Option<&Holding> {
        self.rows.iter().find(|r| r.code == code)
    }
}
