use serde::{Deserialize, Serialize};

/// Which holdings row the drill-down panel is focused on.
///
/// Keyed by canonical stock code rather than table position, so a feed
/// refresh that reorders the table cannot silently switch the
/// drill-down to a different instrument.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Unselected,
    Selected {
        code: String,
    },
}

impl Selection {
    /// Focus a code. The caller passes the canonical form.
    pub fn select(&mut self, code: impl Into<String>) {
        *self = Selection::Selected { code: code.into() };
    }

    pub fn clear(&mut self) {
        *self = Selection::Unselected;
    }

    /// The selected code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Selection::Selected { code } => Some(code),
            Selection::Unselected => None,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }

    /// Re-resolve the selection against a freshly computed holdings
    /// table. A code that is no longer held resets to `Unselected`.
    pub fn reconcile(&mut self, current_codes: &[String]) {
        if let Selection::Selected { code } = self {
            if !current_codes.iter().any(|c| c == code) {
                *self = Selection::Unselected;
            }
        }
    }
}

/// Session-scoped UI state, threaded explicitly through every render
/// pass. Nothing in here is global.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Passed the access-password gate
    pub authenticated: bool,

    /// The data-entry admin panel is open (separate admin-password gate)
    pub admin_panel_open: bool,

    /// Current drill-down focus
    pub selection: Selection,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
