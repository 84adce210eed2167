//! Cursor-based pagination over the filtered view.
//!
//! Page numbers are one-based. The continuation cursor for a page is the
//! identifier of the last record of the previous page, read from the filtered
//! view at the moment the page is requested; page one carries no cursor. Any
//! change to the search or standard criteria resets the pager to page one and
//! clears the cursor, so a narrowed view never fetches from a stale offset.

use crate::app::pipeline;
use crate::app::view::ViewState;
use crate::domain::record::Viewable;
use crate::remote::api::PageQuery;

/// One-based page position plus the page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    page: usize,
    page_size: usize,
}

impl PaginationCursor {
    /// Creates a pager at page one. A zero page size is clamped to one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current one-based page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to the given page; zero is clamped to one.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Returns to page one. Called whenever the filter criteria change.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Continuation token for the current page, derived from the filtered
    /// view: the identifier of the last record of the previous page. `None`
    /// on page one or when the view is too short to supply that record.
    #[must_use]
    pub fn cursor_from<R: Viewable>(&self, filtered: &[R]) -> Option<String> {
        if self.page <= 1 {
            return None;
        }
        let index = (self.page - 1) * self.page_size;
        let boundary = index.checked_sub(1)?;
        filtered.get(boundary).map(|r| r.uid().to_string())
    }

    /// Builds the fetch query for the current page.
    #[must_use]
    pub fn query<R: Viewable>(&self, records: &[R], view: &ViewState) -> PageQuery {
        let filtered = pipeline::apply(records, view);
        PageQuery {
            limit: Some(self.page_size),
            cursor: self.cursor_from(&filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::Student;
    use serde_json::json;

    fn students(n: usize) -> Vec<Student> {
        (0..n)
            .map(|i| {
                serde_json::from_value(json!({ "uid": format!("s{i}"), "name": format!("s{i}") }))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn page_one_has_no_cursor() {
        let pager = PaginationCursor::new(10);
        assert_eq!(pager.cursor_from(&students(25)), None);
    }

    #[test]
    fn cursor_is_last_record_of_previous_page() {
        let mut pager = PaginationCursor::new(10);
        pager.set_page(2);
        // Boundary index 9 in the filtered view.
        assert_eq!(pager.cursor_from(&students(10)), Some("s9".to_string()));

        pager.set_page(3);
        assert_eq!(pager.cursor_from(&students(25)), Some("s19".to_string()));
    }

    #[test]
    fn short_view_yields_no_cursor() {
        let mut pager = PaginationCursor::new(10);
        pager.set_page(3);
        assert_eq!(pager.cursor_from(&students(5)), None);
    }

    #[test]
    fn reset_returns_to_page_one() {
        let mut pager = PaginationCursor::new(10);
        pager.set_page(4);
        pager.reset();
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.cursor_from(&students(40)), None);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let pager = PaginationCursor::new(0);
        assert_eq!(pager.page_size(), 1);
    }
}
