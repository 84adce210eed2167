//! Record traits shared by every moderatable resource type.
//!
//! The console reviews several resource types (students, coordinators, schools,
//! callback requests) that all flow through the same generic store, pipeline,
//! and moderation machinery. These traits are the seams that parameterize that
//! machinery by record shape, instead of duplicating the fetch/filter/moderate
//! logic per resource.
//!
//! # Traits
//!
//! - [`RosterRecord`]: identity and wire-level constants (every resource)
//! - [`Viewable`]: search/filter/score projection used by the view pipeline
//! - [`Moderatable`]: approval semantics used by the moderation workflow

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::score::ScoreBasis;

/// Core contract for a fetched record.
///
/// Upstream records are semi-structured JSON objects; concrete types keep the
/// fields the console works with and preserve everything else in a flattened
/// extra map so that round-trips through the update flow never drop data.
pub trait RosterRecord: Clone + Serialize + DeserializeOwned {
    /// Well-known key holding the record array in a fetch payload
    /// (e.g. `"students"`, or the backend's singular `"school"` quirk).
    const COLLECTION_KEY: &'static str;

    /// URL path segment identifying the resource on the admin API.
    const RESOURCE: &'static str;

    /// Stable unique identifier.
    ///
    /// Identifiers are unique within a store snapshot; the store enforces this
    /// on load and every mutation is keyed by this value.
    fn uid(&self) -> &str;
}

/// Projection of a record into the filter/sort pipeline.
///
/// Defaults are chosen so that resource types without a grade level or a score
/// concept pass cleanly through a pipeline configured with the neutral
/// filters (`All` standard, any basis).
pub trait Viewable: RosterRecord {
    /// Fields matched by the free-text filter, in match-priority order.
    ///
    /// For students this is name and school name; for coordinators name and
    /// email. `None` entries never match.
    fn search_fields(&self) -> [Option<&str>; 2];

    /// Grade level, for resource types that have one.
    fn standard(&self) -> Option<u8> {
        None
    }

    /// Ranking value for the requested basis. Must be pure and total.
    fn score(&self, _basis: ScoreBasis) -> f64 {
        0.0
    }
}

/// Approval state of a record that supports the approve action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting review; the approve action is available.
    Pending,
    /// Approved; monotonic — the approve action is permanently disabled.
    Approved,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Hooks used by the moderation workflow.
///
/// The default implementations describe a record with no approval concept:
/// `approval_status` returns `None`, which makes the approve action
/// unreachable for that resource type, and `mark_approved` is a no-op.
pub trait Moderatable: RosterRecord {
    /// Current approval status, or `None` when the resource has no approval
    /// concept (students, schools).
    fn approval_status(&self) -> Option<ApprovalStatus> {
        None
    }

    /// Applies the optimistic approve update: status becomes approved with the
    /// given timestamp.
    fn mark_approved(&mut self, _at: DateTime<Utc>) {}
}
