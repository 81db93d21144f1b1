use crate::errors::DashboardError;
use crate::models::columns;
use crate::models::feed::{FeedKind, FeedTable};
use crate::models::holding::{Holding, HoldingsReport, PortfolioTotals};

use super::normalize::{coalesce, normalize_code, normalize_number};

/// Turns the raw holdings feed into cleaned per-stock rows and
/// portfolio totals.
///
/// Pure business logic, no I/O. The feed arrives already parsed into
/// text cells; everything numeric is cleaned here.
pub struct HoldingsService;

impl HoldingsService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate one holdings table.
    ///
    /// Steps, in order: drop subtotal rows, canonicalize codes, clean
    /// the six numeric columns, drop rows no longer held, apply the
    /// missing-price correction, derive totals. The code column is
    /// required; the numeric columns are tolerated when absent and read
    /// as zero.
    pub fn aggregate(&self, table: &FeedTable) -> Result<HoldingsReport, DashboardError> {
        let code_col = table.column_index(columns::CODE).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::Holdings.label().into(),
                column: columns::CODE.into(),
            }
        })?;

        let cost_col = table.column_index(columns::COST_BASIS);
        let value_col = table.column_index(columns::MARKET_VALUE);
        let gain_col = table.column_index(columns::UNREALIZED_GAIN);
        let shares_col = table.column_index(columns::SHARES);
        let avg_col = table.column_index(columns::AVG_COST);
        let price_col = table.column_index(columns::CURRENT_PRICE);

        let mut rows = Vec::new();
        let mut price_approximated = false;

        for i in 0..table.row_count() {
            let raw_code = table.cell(i, code_col);

            // Subtotal lines are excluded before any cleaning.
            if columns::SUBTOTAL_MARKERS.iter().any(|m| raw_code.contains(m)) {
                continue;
            }

            let num =
                |col: Option<usize>| coalesce(normalize_number(col.map_or("", |c| table.cell(i, c))));

            // Zero shares means the position was fully sold; the sheet
            // keeps the row, the dashboard does not.
            let shares = num(shares_col);
            if shares <= 0.0 {
                continue;
            }

            let cost_basis = num(cost_col);
            let mut market_value = num(value_col);
            let mut unrealized_gain = num(gain_col);

            // Missing-price correction: a zero valuation with capital
            // invested means the price cell was unavailable, not that
            // the position is worthless. Value the position at cost and
            // carry a flat gain until the feed recovers.
            if market_value == 0.0 && cost_basis > 0.0 {
                market_value = cost_basis;
                unrealized_gain = 0.0;
                price_approximated = true;
            }

            rows.push(Holding {
                code: normalize_code(raw_code),
                cost_basis,
                market_value,
                unrealized_gain,
                shares,
                avg_cost: num(avg_col),
                current_price: num(price_col),
            });
        }

        let totals = PortfolioTotals::from_rows(&rows);

        Ok(HoldingsReport {
            rows,
            totals,
            price_approximated,
        })
    }
}

impl Default for HoldingsService {
    fn default() -> Self {
        Self::new()
    }
}
