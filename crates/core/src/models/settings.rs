use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

use super::feed::FeedKind;

fn default_cache_ttl() -> u64 {
    60
}

fn default_activity_window() -> i64 {
    30
}

/// Deployment configuration, read once at startup from the secret
/// store's JSON document.
///
/// Every URL and password is required; a missing or empty value is a
/// fatal configuration error carrying the name of the field to fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Published-CSV URL of the holdings sheet
    pub holdings_url: String,

    /// Published-CSV URL of the transactions sheet
    pub transactions_url: String,

    /// Published-CSV URL of the dividends sheet
    pub dividends_url: String,

    /// Published-CSV URL of the announcements sheet
    pub announcements_url: String,

    /// Published-CSV URL of the recent-activity sheet
    pub activity_url: String,

    /// Published-CSV URL of the stock-name sheet
    pub stock_names_url: String,

    /// Endpoint accepting write-back actions
    pub write_endpoint_url: String,

    /// Password gating the dashboard itself
    pub access_password: String,

    /// Password gating the data-entry admin panel
    pub admin_password: String,

    /// Seconds a fetched feed body stays fresh in the cache
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Rolling window of the recent-activity timeline, in days
    #[serde(default = "default_activity_window")]
    pub activity_window_days: i64,
}

impl Settings {
    /// Parse and validate settings from the secret store's JSON.
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| DashboardError::Config(format!("cannot parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate settings from a JSON file on disk.
    pub fn from_file(path: &str) -> Result<Self, DashboardError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("cannot read settings file {path}: {e}"))
        })?;
        Self::from_json(&json)
    }

    /// Check that every required value is present and non-empty.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let required = [
            ("holdings_url", &self.holdings_url),
            ("transactions_url", &self.transactions_url),
            ("dividends_url", &self.dividends_url),
            ("announcements_url", &self.announcements_url),
            ("activity_url", &self.activity_url),
            ("stock_names_url", &self.stock_names_url),
            ("write_endpoint_url", &self.write_endpoint_url),
            ("access_password", &self.access_password),
            ("admin_password", &self.admin_password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DashboardError::Config(format!(
                    "missing required setting '{name}': add it to the secrets file before starting"
                )));
            }
        }
        Ok(())
    }

    /// The URL configured for a feed.
    #[must_use]
    pub fn feed_url(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Holdings => &self.holdings_url,
            FeedKind::Transactions => &self.transactions_url,
            FeedKind::Dividends => &self.dividends_url,
            FeedKind::Announcements => &self.announcements_url,
            FeedKind::RecentActivity => &self.activity_url,
            FeedKind::StockNames => &self.stock_names_url,
        }
    }
}
