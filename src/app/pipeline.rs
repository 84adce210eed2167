//! Filter and sort pipeline over the fetched collection.
//!
//! The pipeline is a pure function of the store snapshot and the view
//! criteria: filter by search text, filter by standard, then stable-sort by
//! ranking score. It never mutates the store, so re-running it with unchanged
//! inputs yields an identical list, and records tied on score keep their
//! upstream relative order in both sort directions.

use crate::app::view::{SortOrder, ViewState};
use crate::domain::record::Viewable;

/// Derives the visible, ordered list from a store snapshot.
///
/// Search matches case-insensitively against any of the record's searchable
/// fields; absent fields never match. The sort is stable, so the upstream
/// order breaks ties.
#[must_use]
pub fn apply<R: Viewable>(records: &[R], view: &ViewState) -> Vec<R> {
    let needle = view.needle();

    let mut visible: Vec<R> = records
        .iter()
        .filter(|record| {
            matches_search(*record, &needle) && view.standard.matches(record.standard())
        })
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let (x, y) = (a.score(view.basis), b.score(view.basis));
        match view.order {
            SortOrder::HighToLow => y.total_cmp(&x),
            SortOrder::LowToHigh => x.total_cmp(&y),
        }
    });

    visible
}

fn matches_search<R: Viewable>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
