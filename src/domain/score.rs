//! Score extraction for student ranking.
//!
//! Derives the numeric ranking value the sort order is driven by. A student's
//! marks hold two independent attempt sequences, `mock` (practice) and `live`;
//! the ranking value for a category is the score of the *first* attempt in
//! that sequence. Attempts are an explicitly ordered sequence, so "first
//! attempt" is well-defined rather than incidental key order.
//!
//! Extraction is pure and total: absent marks, an absent category, or an empty
//! attempt sequence contribute 0 and never error. The function is invoked on
//! every re-sort, so it allocates nothing.

use serde::{Deserialize, Serialize};

use crate::domain::student::Marks;

/// Which score the view is filtered and sorted by.
///
/// Wire spellings match the console's option values: `all`, `practice`, `live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBasis {
    /// Sum of the practice and live scores.
    #[serde(rename = "all")]
    Combined,
    /// First attempt under `marks.mock`.
    Practice,
    /// First attempt under `marks.live`.
    Live,
}

impl Default for ScoreBasis {
    fn default() -> Self {
        Self::Combined
    }
}

/// Score of the first attempt in an ordered attempt sequence, 0 when empty.
fn first_attempt_score(attempts: &[crate::domain::student::Attempt]) -> f64 {
    attempts.first().map_or(0.0, |attempt| attempt.score)
}

/// Extracts the ranking value for a student's marks under the given basis.
///
/// `None` marks contribute 0 for every basis.
///
/// # Examples
///
/// ```
/// use rosterdeck::domain::score::{extract, ScoreBasis};
///
/// assert_eq!(extract(None, ScoreBasis::Combined), 0.0);
/// ```
#[must_use]
pub fn extract(marks: Option<&Marks>, basis: ScoreBasis) -> f64 {
    let Some(marks) = marks else {
        return 0.0;
    };

    let practice = first_attempt_score(&marks.mock);
    let live = first_attempt_score(&marks.live);

    match basis {
        ScoreBasis::Practice => practice,
        ScoreBasis::Live => live,
        ScoreBasis::Combined => practice + live,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::Attempt;

    fn attempt(id: &str, score: f64) -> Attempt {
        Attempt {
            id: id.to_string(),
            score,
        }
    }

    #[test]
    fn absent_marks_score_zero() {
        assert_eq!(extract(None, ScoreBasis::Practice), 0.0);
        assert_eq!(extract(None, ScoreBasis::Live), 0.0);
        assert_eq!(extract(None, ScoreBasis::Combined), 0.0);
    }

    #[test]
    fn empty_categories_score_zero() {
        let marks = Marks::default();
        assert_eq!(extract(Some(&marks), ScoreBasis::Practice), 0.0);
        assert_eq!(extract(Some(&marks), ScoreBasis::Live), 0.0);
        assert_eq!(extract(Some(&marks), ScoreBasis::Combined), 0.0);
    }

    #[test]
    fn first_attempt_wins() {
        let marks = Marks {
            mock: vec![attempt("a1", 42.0), attempt("a2", 99.0)],
            live: vec![],
        };
        assert_eq!(extract(Some(&marks), ScoreBasis::Practice), 42.0);
    }

    #[test]
    fn combined_sums_both_categories() {
        let marks = Marks {
            mock: vec![attempt("a1", 10.0)],
            live: vec![attempt("b1", 32.5)],
        };
        assert_eq!(extract(Some(&marks), ScoreBasis::Combined), 42.5);
        assert_eq!(extract(Some(&marks), ScoreBasis::Live), 32.5);
    }
}
