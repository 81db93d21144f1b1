use thiserror::Error;

/// Unified error type for the entire stock-dashboard-core library.
/// Every fallible public function returns `Result<T, DashboardError>`.
#[derive(Debug, Error)]
pub enum DashboardError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    // ── Feeds / Network ─────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Feed {feed} is missing required column: {column}")]
    MissingColumn {
        feed: String,
        column: String,
    },

    #[error("Response is not tabular: {0}")]
    Tabular(String),

    // ── Write-back ──────────────────────────────────────────────────
    #[error("Write rejected ({action}): {message}")]
    WriteRejected {
        action: String,
        message: String,
    },

    // ── Serialization / Business Logic ──────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Tabular(e.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs before they
        // can reach logs. Published-sheet URLs carry long access tokens.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        DashboardError::Network(sanitized)
    }
}
