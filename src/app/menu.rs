//! Per-row action menu state.
//!
//! At most one row menu is open at a time, keyed by record identifier. Any
//! interaction outside the open menu closes it.

/// Tracks which row's action menu is open, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMenuController {
    open: Option<String>,
}

impl RowMenuController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the row whose menu is open, if any.
    #[must_use]
    pub fn open_row(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Whether the given row's menu is open.
    #[must_use]
    pub fn is_open(&self, uid: &str) -> bool {
        self.open.as_deref() == Some(uid)
    }

    /// Toggles the menu for a row: a second toggle on the same row closes it,
    /// a toggle on another row moves the single open menu there.
    ///
    /// Returns `true` when the state changed.
    pub fn toggle(&mut self, uid: &str) -> bool {
        if self.is_open(uid) {
            self.open = None;
        } else {
            self.open = Some(uid.to_string());
        }
        true
    }

    /// Closes the open menu. Returns `true` when a menu was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }
}
