use serde::{Deserialize, Serialize};

/// One cleaned trade event from the transactions feed.
///
/// The date stays as the feed's original text; the feeds are loosely
/// typed and dates are only parsed where ordering needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Canonical stock code
    pub code: String,

    /// Trade date as received (e.g. "2024-03-15" or "2024/3/15")
    pub date: String,

    /// Transaction type label as received
    pub kind: String,

    /// Price per share at execution
    pub unit_price: f64,

    /// Capital invested in this trade (always > 0 after filtering)
    pub invested: f64,

    /// Number of shares traded
    pub shares: f64,

    /// Broker fee
    pub fee: f64,
}
