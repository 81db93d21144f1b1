use serde::{Deserialize, Serialize};

/// Lifecycle of a dividend payout as tracked in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividendStatus {
    /// Recorded, not yet applied anywhere
    Unused,
    /// Withdrawn as cash
    PaidOut,
    /// Used to buy more shares
    Reinvested,
}

impl DividendStatus {
    /// The sheet's label for this status.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DividendStatus::Unused => "未使用",
            DividendStatus::PaidOut => "已領取",
            DividendStatus::Reinvested => "再投入",
        }
    }

    /// Parse a sheet label back into a status. Unknown labels are `None`;
    /// reads keep the raw text, so rows with labels this enum predates
    /// still round-trip untouched.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "未使用" => Some(DividendStatus::Unused),
            "已領取" => Some(DividendStatus::PaidOut),
            "再投入" => Some(DividendStatus::Reinvested),
            _ => None,
        }
    }
}

impl std::fmt::Display for DividendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One dividend payout event from the dividends feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Canonical stock code
    pub code: String,

    /// Season label (e.g. "2024Q3")
    pub season: String,

    /// Payout date as received
    pub date: String,

    /// Dividend per share
    pub per_share: f64,

    /// Total amount received
    pub amount: f64,

    /// Status text as received; see [`DividendStatus`] for known labels
    pub status: String,
}
