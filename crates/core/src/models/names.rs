use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::DashboardError;
use crate::services::normalize::normalize_code;

use super::columns;
use super::feed::{FeedKind, FeedTable};

/// Mapping from canonical stock code to display name.
///
/// Used only to decorate the code shown to the user; never part of any
/// numeric computation. Keys are canonicalized on every insert and
/// lookup, so the map joins against any feed's code formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockNameMap {
    names: HashMap<String, String>,
}

impl StockNameMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from the stock-name feed. Rows with an empty code
    /// or name are skipped; on duplicate codes the later row wins.
    pub fn from_table(table: &FeedTable) -> Result<Self, DashboardError> {
        let code_col = table.column_index(columns::CODE).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::StockNames.label().into(),
                column: columns::CODE.into(),
            }
        })?;
        let name_col = table.column_index(columns::STOCK_NAME).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::StockNames.label().into(),
                column: columns::STOCK_NAME.into(),
            }
        })?;

        let mut map = Self::new();
        for i in 0..table.row_count() {
            let raw_code = table.cell(i, code_col).trim();
            let name = table.cell(i, name_col).trim();
            if raw_code.is_empty() || name.is_empty() {
                continue;
            }
            map.insert(raw_code, name);
        }
        Ok(map)
    }

    /// Register or replace the display name for a code.
    pub fn insert(&mut self, code: &str, name: impl Into<String>) {
        self.names.insert(normalize_code(code), name.into());
    }

    /// Display name for a code, if one is registered.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(&normalize_code(code)).map(String::as_str)
    }

    /// Decorated label: "0050 元大台灣50", or the bare canonical code
    /// when no name is registered.
    #[must_use]
    pub fn display_label(&self, code: &str) -> String {
        let code = normalize_code(code);
        match self.names.get(&code) {
            Some(name) if !name.trim().is_empty() => format!("{code} {name}"),
            _ => code,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
