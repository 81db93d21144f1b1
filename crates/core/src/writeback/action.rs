use serde::{Deserialize, Serialize};

/// One structured record submitted to the write endpoint. The `action`
/// discriminator tells the endpoint which sheet to append to or update.
///
/// Codes are canonicalized before an action is built; beyond that the
/// payload travels as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WriteAction {
    /// Post a dated message to the announcements sheet.
    AddAnnouncement {
        date: String,
        category: String,
        message: String,
    },

    /// Record incoming funds (capital added to the account).
    AddInflow {
        date: String,
        amount: f64,
        note: String,
    },

    /// Record a trade against one stock.
    AddTrade {
        code: String,
        date: String,
        kind: String,
        unit_price: f64,
        shares: f64,
        fee: f64,
        invested: f64,
    },

    /// Register or update the display name shown for a code.
    UpsertStockName { code: String, name: String },

    /// Record a dividend payout event.
    AddDividend {
        code: String,
        season: String,
        date: String,
        per_share: f64,
        amount: f64,
    },

    /// Update the status of an existing dividend entry.
    UpdateDividendStatus {
        code: String,
        season: String,
        status: String,
    },
}

impl WriteAction {
    /// Short label used in log fields and error messages. Matches the
    /// wire discriminator.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            WriteAction::AddAnnouncement { .. } => "add_announcement",
            WriteAction::AddInflow { .. } => "add_inflow",
            WriteAction::AddTrade { .. } => "add_trade",
            WriteAction::UpsertStockName { .. } => "upsert_stock_name",
            WriteAction::AddDividend { .. } => "add_dividend",
            WriteAction::UpdateDividendStatus { .. } => "update_dividend_status",
        }
    }
}

/// The endpoint's echo for one submitted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteReceipt {
    /// "success", or an endpoint-specific failure status
    pub status: String,

    /// Human-readable detail, filled on failure
    #[serde(default)]
    pub message: String,
}

impl WriteReceipt {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
