//! View model types representing renderable roster state.
//!
//! View models are immutable snapshots computed from [`RosterState`] and
//! consumed by whatever front end embeds the engine. They contain no business
//! logic, only display-ready strings: every absent upstream value is already
//! rendered as `"N/A"`, scores are formatted for the selected basis, and rank
//! columns are flattened out of the nested rank structure.

use crate::app::state::{Banner, RosterState};
use crate::domain::record::Viewable;
use crate::domain::score::ScoreBasis;
use crate::domain::student::{PaymentStatus, Student};

/// Placeholder for display fields the upstream record does not carry.
pub const MISSING: &str = "N/A";

/// Complete view model for one roster page.
#[derive(Debug, Clone)]
pub struct RosterViewModel {
    /// Rows of the visible, ordered page.
    pub rows: Vec<StudentRow>,

    /// One-based page number.
    pub page: usize,

    /// Whether a fetch is outstanding.
    pub loading: bool,

    /// Error banner to present, if any.
    pub banner: Option<Banner>,

    /// Row whose action menu is open, if any.
    pub open_menu: Option<String>,

    /// Confirmation prompt for the pending moderation intent, if any.
    pub confirmation: Option<String>,
}

/// One display row of the student table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub uid: String,
    pub name: String,
    pub school: String,
    pub standard: String,
    /// Score under the currently selected basis, formatted.
    pub score: String,
    pub global_rank: String,
    pub country_rank: String,
    pub state_rank: String,
    pub payment: String,
}

/// Computes the student table view model from roster state.
#[must_use]
pub fn student_viewmodel(state: &RosterState<Student>) -> RosterViewModel {
    let rows = state.filtered().iter().map(|s| student_row(s, state)).collect();

    RosterViewModel {
        rows,
        page: state.pager.page(),
        loading: state.loading,
        banner: state.banner.clone(),
        open_menu: state.menu.open_row().map(str::to_string),
        confirmation: state.moderation.pending().map(|intent| {
            format!("Are you sure you want to {} {}?", intent.action.label(), intent.uid)
        }),
    }
}

fn student_row(student: &Student, state: &RosterState<Student>) -> StudentRow {
    let ranks = student
        .ranks
        .as_ref()
        .and_then(|r| r.live.as_ref());

    StudentRow {
        uid: student.uid.clone(),
        name: text_or_missing(student.name.as_deref()),
        school: text_or_missing(student.school_name.as_deref()),
        standard: student
            .standard
            .map_or_else(|| MISSING.to_string(), |s| s.to_string()),
        score: score_text(student, state.view.basis),
        global_rank: rank_text(ranks.and_then(|r| r.global.as_ref().and_then(|e| e.rank))),
        country_rank: rank_text(ranks.and_then(|r| r.country.as_ref().and_then(|e| e.rank))),
        state_rank: rank_text(ranks.and_then(|r| r.state.as_ref().and_then(|e| e.rank))),
        payment: match student.payment_status {
            Some(PaymentStatus::Paid) => "Paid".to_string(),
            Some(PaymentStatus::Unpaid) => "Unpaid".to_string(),
            None => MISSING.to_string(),
        },
    }
}

/// Score column text. A single basis shows one value; the combined basis
/// shows both category scores side by side.
fn score_text(student: &Student, basis: ScoreBasis) -> String {
    match basis {
        ScoreBasis::Practice | ScoreBasis::Live => {
            format!("{:.1}", student.score(basis))
        }
        ScoreBasis::Combined => format!(
            "{:.1} / {:.1}",
            student.score(ScoreBasis::Practice),
            student.score(ScoreBasis::Live)
        ),
    }
}

fn text_or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

fn rank_text(rank: Option<u32>) -> String {
    rank.map_or_else(|| MISSING.to_string(), |r| r.to_string())
}
