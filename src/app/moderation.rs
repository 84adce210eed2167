//! Moderation workflow: confirmation gating, optimistic dispatch, rollback.
//!
//! Destructive record actions go through two phases. First an action is
//! *selected* for a row, producing a single pending intent that must be
//! explicitly confirmed or cancelled; selecting another intent replaces the
//! previous one. On confirmation the store is mutated optimistically, a
//! rollback token capturing the prior record (and its position) is parked
//! under the target identifier, and the remote call is dispatched. Resolution
//! is keyed by identifier only, so several confirmed mutations may be in
//! flight at once and resolve in any order: success discards the token,
//! failure replays it against the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::record::RosterRecord;

/// The two destructive record actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    /// Marks the record approved.
    Approve,
    /// Removes the record's account.
    Delete,
}

impl ModerationAction {
    /// Label used in banners and the activity feed.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Delete => "delete",
        }
    }
}

/// A selected-but-unconfirmed action against one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationIntent {
    pub action: ModerationAction,
    pub uid: String,
}

/// Everything needed to undo one optimistic mutation.
///
/// For an approve this is the record as it was before the status flip; for a
/// delete it is the removed record together with its index in the store, so a
/// failed delete restores it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RollbackToken<R> {
    pub record: R,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct InFlight<R> {
    action: ModerationAction,
    rollback: RollbackToken<R>,
}

/// Confirmation gate plus the in-flight mutation ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationWorkflow<R> {
    pending: Option<ModerationIntent>,
    in_flight: HashMap<String, InFlight<R>>,
}

impl<R> Default for ModerationWorkflow<R> {
    fn default() -> Self {
        Self {
            pending: None,
            in_flight: HashMap::new(),
        }
    }
}

impl<R: RosterRecord> ModerationWorkflow<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects an action for confirmation, replacing any previous pending
    /// intent.
    pub fn select(&mut self, action: ModerationAction, uid: &str) {
        self.pending = Some(ModerationIntent {
            action,
            uid: uid.to_string(),
        });
    }

    /// The intent awaiting confirmation, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&ModerationIntent> {
        self.pending.as_ref()
    }

    /// Discards the pending intent without side effects.
    pub fn cancel(&mut self) -> Option<ModerationIntent> {
        self.pending.take()
    }

    /// Takes the pending intent for confirmation.
    pub fn take_pending(&mut self) -> Option<ModerationIntent> {
        self.pending.take()
    }

    /// Registers a confirmed, dispatched mutation under its target
    /// identifier. A later confirmation for the same identifier overwrites
    /// the earlier token.
    pub fn begin(&mut self, uid: &str, action: ModerationAction, rollback: RollbackToken<R>) {
        if self.in_flight.contains_key(uid) {
            tracing::warn!(uid = %uid, "overwriting in-flight mutation for identifier");
        }
        self.in_flight
            .insert(uid.to_string(), InFlight { action, rollback });
    }

    /// Whether a mutation for the identifier is awaiting resolution.
    #[must_use]
    pub fn is_in_flight(&self, uid: &str) -> bool {
        self.in_flight.contains_key(uid)
    }

    /// Resolves the in-flight mutation for the identifier, returning its
    /// action and rollback token. `None` for unknown identifiers, which can
    /// happen when a stale response arrives after a reload.
    pub fn resolve(&mut self, uid: &str) -> Option<(ModerationAction, RollbackToken<R>)> {
        let entry = self.in_flight.remove(uid)?;
        Some((entry.action, entry.rollback))
    }
}
