use std::cmp::Reverse;

use crate::errors::DashboardError;
use crate::models::columns;
use crate::models::dividend::Dividend;
use crate::models::feed::{FeedKind, FeedTable};
use crate::models::transaction::Transaction;

use super::normalize::{coalesce, normalize_code, normalize_number, parse_feed_date};

/// Filters the transaction and dividend feeds down to one stock for the
/// drill-down panel.
///
/// Pure business logic, no I/O. Both feeds join on the canonical stock
/// code, so each feed's own code formatting is irrelevant.
pub struct DetailService;

impl DetailService {
    pub fn new() -> Self {
        Self
    }

    /// Trades for one stock, feed order preserved.
    ///
    /// Rows whose invested amount cleans to zero or less are placeholder
    /// lines in the sheet, not real trades, and are dropped. That filter
    /// only applies when the feed carries the invested-amount column.
    pub fn transactions_for(
        &self,
        table: &FeedTable,
        code: &str,
    ) -> Result<Vec<Transaction>, DashboardError> {
        let code_col = table.column_index(columns::CODE).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::Transactions.label().into(),
                column: columns::CODE.into(),
            }
        })?;

        let date_col = table.column_index(columns::DATE);
        let kind_col = table.column_index(columns::TXN_KIND);
        let price_col = table.column_index(columns::UNIT_PRICE);
        let invested_col = table.column_index(columns::INVESTED);
        let count_col = table.column_index(columns::SHARE_COUNT);
        let fee_col = table.column_index(columns::FEE);

        let wanted = normalize_code(code);
        let mut out = Vec::new();

        for i in 0..table.row_count() {
            if normalize_code(table.cell(i, code_col)) != wanted {
                continue;
            }

            let num =
                |col: Option<usize>| coalesce(normalize_number(col.map_or("", |c| table.cell(i, c))));
            let text = |col: Option<usize>| col.map_or("", |c| table.cell(i, c)).trim().to_string();

            let invested = num(invested_col);
            if invested_col.is_some() && invested <= 0.0 {
                continue;
            }

            out.push(Transaction {
                code: wanted.clone(),
                date: text(date_col),
                kind: text(kind_col),
                unit_price: num(price_col),
                invested,
                shares: num(count_col),
                fee: num(fee_col),
            });
        }

        Ok(out)
    }

    /// Dividends for one stock, feed order preserved.
    ///
    /// No blank-filter here: a zero-amount dividend row is a real entry
    /// (announced but not yet paid) and stays in.
    pub fn dividends_for(
        &self,
        table: &FeedTable,
        code: &str,
    ) -> Result<Vec<Dividend>, DashboardError> {
        let code_col = table.column_index(columns::CODE).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::Dividends.label().into(),
                column: columns::CODE.into(),
            }
        })?;

        let season_col = table.column_index(columns::SEASON);
        let date_col = table.column_index(columns::DATE);
        let per_share_col = table.column_index(columns::PER_SHARE);
        let amount_col = table.column_index(columns::AMOUNT_RECEIVED);
        let status_col = table.column_index(columns::STATUS);

        let wanted = normalize_code(code);
        let mut out = Vec::new();

        for i in 0..table.row_count() {
            if normalize_code(table.cell(i, code_col)) != wanted {
                continue;
            }

            let num =
                |col: Option<usize>| coalesce(normalize_number(col.map_or("", |c| table.cell(i, c))));
            let text = |col: Option<usize>| col.map_or("", |c| table.cell(i, c)).trim().to_string();

            out.push(Dividend {
                code: wanted.clone(),
                season: text(season_col),
                date: text(date_col),
                per_share: num(per_share_col),
                amount: num(amount_col),
                status: text(status_col),
            });
        }

        Ok(out)
    }

    /// Order dividends newest payout first. Rows whose date does not
    /// parse sort last, keeping their relative feed order.
    pub fn sort_dividends_newest_first(&self, dividends: &mut [Dividend]) {
        dividends.sort_by_key(|d| Reverse(parse_feed_date(&d.date)));
    }
}

impl Default for DetailService {
    fn default() -> Self {
        Self::new()
    }
}
