use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

/// The six tabular feeds the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedKind {
    /// One row per held instrument, plus a subtotal row to discard
    Holdings,
    /// One row per trade event
    Transactions,
    /// One row per dividend payout event
    Dividends,
    /// One row per dated message
    Announcements,
    /// One row per dated event inside the rolling timeline window
    RecentActivity,
    /// Code to display-name pairs
    StockNames,
}

impl FeedKind {
    /// Stable label used in log fields and error messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::Holdings => "holdings",
            FeedKind::Transactions => "transactions",
            FeedKind::Dividends => "dividends",
            FeedKind::Announcements => "announcements",
            FeedKind::RecentActivity => "recent activity",
            FeedKind::StockNames => "stock names",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-feed load result: either the parsed payload or the reason the
/// feed could not be loaded.
///
/// Failure of one feed is an inspectable value the renderer shows next
/// to the healthy feeds; it never aborts the rest of a render pass.
/// `Unavailable` is also distinct from an empty `Ready` payload, so
/// "no data source" and "no rows yet" render differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedStatus<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> FeedStatus<T> {
    /// Apply `f` to the payload of a `Ready` status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FeedStatus<U> {
        match self {
            FeedStatus::Ready(value) => FeedStatus::Ready(f(value)),
            FeedStatus::Unavailable(reason) => FeedStatus::Unavailable(reason),
        }
    }

    /// Chain a computation that may itself come up unavailable.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> FeedStatus<U>) -> FeedStatus<U> {
        match self {
            FeedStatus::Ready(value) => f(value),
            FeedStatus::Unavailable(reason) => FeedStatus::Unavailable(reason),
        }
    }

    /// The payload, if ready.
    pub fn ready(self) -> Option<T> {
        match self {
            FeedStatus::Ready(value) => Some(value),
            FeedStatus::Unavailable(_) => None,
        }
    }

    /// Borrowing variant of [`ready`](Self::ready).
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            FeedStatus::Ready(value) => Some(value),
            FeedStatus::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, FeedStatus::Ready(_))
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FeedStatus::Unavailable(_))
    }

    /// Why the feed is unavailable, if it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            FeedStatus::Unavailable(reason) => Some(reason),
            FeedStatus::Ready(_) => None,
        }
    }
}

/// A parsed tabular feed: trimmed column headers plus rows of text cells.
///
/// Every cell is text at this level. Numeric cleaning happens in the
/// services, so a heterogeneous source can never cause a type mismatch
/// here. Rows are stored at header width; short or ragged source rows
/// read as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeedTable {
    /// Parse a delimited-text body as fetched from a published sheet.
    ///
    /// Rejects empty bodies and HTML (a sheet that requires sign-in
    /// answers with a login page instead of the export).
    pub fn parse_csv(body: &str) -> Result<Self, DashboardError> {
        let text = body.trim_start_matches('\u{feff}').trim();
        if text.is_empty() {
            return Err(DashboardError::Tabular("empty response body".into()));
        }

        let head: String = text.chars().take(16).collect::<String>().to_ascii_lowercase();
        if head.starts_with("<!doctype") || head.starts_with("<html") {
            return Err(DashboardError::Tabular(
                "response is an HTML page, not delimited text".into(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(DashboardError::Tabular("no column headers".into()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                (0..headers.len())
                    .map(|i| record.get(i).unwrap_or("").to_string())
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }

    /// Build a table from in-memory headers and rows.
    #[must_use]
    pub fn from_rows<S: Into<String>>(headers: Vec<S>, rows: Vec<Vec<S>>) -> Self {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.into().trim().to_string())
            .collect();
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self { headers, rows }
    }

    /// Index of a named column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at (`row`, `col`); empty when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }
}
