//! View criteria: search, standard filter, score basis, and sort order.
//!
//! A [`ViewState`] is a plain value describing how the fetched collection
//! should be presented. It never touches the store; the pipeline reads it to
//! derive the visible list, so the same criteria applied to the same snapshot
//! always produce the same view.

use crate::domain::score::ScoreBasis;

/// Direction of the score sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest score first. The default presentation.
    #[default]
    HighToLow,
    /// Lowest score first.
    LowToHigh,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::HighToLow => Self::LowToHigh,
            Self::LowToHigh => Self::HighToLow,
        }
    }
}

/// Grade-level filter over records that expose a standard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StandardFilter {
    /// No grade filtering.
    #[default]
    All,
    /// Only records in the given grade. Records without a standard never
    /// match a specific grade.
    Grade(u8),
}

impl StandardFilter {
    /// Whether a record with the given standard passes the filter.
    #[must_use]
    pub fn matches(self, standard: Option<u8>) -> bool {
        match self {
            Self::All => true,
            Self::Grade(grade) => standard == Some(grade),
        }
    }
}

/// Current presentation criteria for one roster view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Raw search text. Matching is case-insensitive substring over each
    /// record's searchable fields; surrounding whitespace is ignored.
    pub search: String,

    /// Grade-level filter.
    pub standard: StandardFilter,

    /// Which attempt category feeds the ranking score.
    pub basis: ScoreBasis,

    /// Sort direction over the ranking score.
    pub order: SortOrder,
}

impl ViewState {
    /// Normalized search needle: trimmed and lowercased. Empty means no
    /// search filtering.
    #[must_use]
    pub fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }
}
