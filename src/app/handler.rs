//! Event handling and state transition logic.
//!
//! This module implements the single event handler that processes console
//! interactions and remote resolutions, translating them into state changes
//! and action sequences. It is the only writer of [`RosterState`].
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow:
//! 1. Events arrive from the console or from resolved remote calls
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `RosterState` component methods
//! 4. Actions are collected and returned for the runtime to execute
//!
//! Remote results come back as [`RosterEvent::Remote`] wrapping a
//! [`RemoteResponse`], applied in arrival order. Mutations resolve by target
//! identifier, so responses arriving out of issue order are still applied to
//! the right record.
//!
//! # Failure policy
//!
//! No failure is fatal. Fetch failures keep the previous collection and raise
//! a banner; rejected mutations roll the optimistic change back and raise a
//! banner; a missing credential refuses the dispatch outright.

use chrono::Utc;

use crate::app::actions::RosterAction;
use crate::app::moderation::{ModerationAction, RollbackToken};
use crate::app::state::{BannerKind, RosterState};
use crate::app::view::{SortOrder, StandardFilter};
use crate::domain::error::Result;
use crate::domain::record::{ApprovalStatus, Moderatable, Viewable};
use crate::domain::score::ScoreBasis;
use crate::remote::api::RemoteResponse;
use crate::session::Session;
use serde_json::{Map, Value};

/// Events triggered by console interaction or by resolved remote calls.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterEvent<R> {
    /// Search text changed. Resets pagination when past page one.
    SearchChanged(String),
    /// Grade-level filter changed. Resets pagination when past page one.
    StandardSelected(StandardFilter),
    /// Ranking score source changed. Re-sorts locally.
    ScoreBasisSelected(ScoreBasis),
    /// Sort direction changed. Re-sorts locally.
    SortOrderSelected(SortOrder),
    /// A specific page was requested.
    PageRequested(usize),

    /// A row's action menu was toggled.
    MenuToggled(String),
    /// An interaction landed outside the open menu.
    OutsideInteraction,

    /// A moderation action was picked from a row menu.
    ActionSelected {
        action: ModerationAction,
        uid: String,
    },
    /// The pending moderation intent was confirmed.
    ConfirmPending,
    /// The pending moderation intent was cancelled.
    CancelPending,

    /// An edit form was submitted with a field patch.
    EditSubmitted {
        uid: String,
        patch: Map<String, Value>,
    },

    /// The error banner was dismissed.
    BannerDismissed,

    /// A remote call resolved.
    Remote(RemoteResponse<R>),
}

/// Processes an event, mutates roster state, and returns actions to execute.
///
/// Returns a redraw flag (whether anything visible changed) and the actions
/// the runtime must execute. Events are processed sequentially on one thread,
/// so transitions are deterministic.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` keeps the seam uniform with
/// the rest of the crate's fallible surfaces.
pub fn handle_event<R>(
    state: &mut RosterState<R>,
    session: &Session,
    event: RosterEvent<R>,
) -> Result<(bool, Vec<RosterAction>)>
where
    R: Viewable + Moderatable,
{
    let _span = tracing::debug_span!("handle_event").entered();
    let mut actions = Vec::new();

    let redraw = match event {
        RosterEvent::SearchChanged(search) => {
            state.view.search = search;
            actions.extend(reset_pagination_if_needed(state));
            true
        }

        RosterEvent::StandardSelected(standard) => {
            state.view.standard = standard;
            actions.extend(reset_pagination_if_needed(state));
            true
        }

        RosterEvent::ScoreBasisSelected(basis) => {
            state.view.basis = basis;
            true
        }

        RosterEvent::SortOrderSelected(order) => {
            state.view.order = order;
            true
        }

        RosterEvent::PageRequested(page) => {
            if page.max(1) == state.pager.page() {
                false
            } else {
                state.menu.close();
                state.pager.set_page(page);
                state.loading = true;
                actions.push(RosterAction::Fetch {
                    query: state.page_query(),
                });
                true
            }
        }

        RosterEvent::MenuToggled(uid) => state.menu.toggle(&uid),

        RosterEvent::OutsideInteraction => state.menu.close(),

        RosterEvent::ActionSelected { action, uid } => {
            state.menu.close();
            select_action(state, action, &uid);
            true
        }

        RosterEvent::ConfirmPending => confirm_pending(state, session, &mut actions),

        RosterEvent::CancelPending => state.moderation.cancel().is_some(),

        RosterEvent::EditSubmitted { uid, patch } => {
            // No optimistic change: the edit flow applies server state only
            // on success.
            actions.push(RosterAction::UpdateFields { uid, patch });
            false
        }

        RosterEvent::BannerDismissed => state.banner.take().is_some(),

        RosterEvent::Remote(response) => apply_remote(state, response),
    };

    Ok((redraw, actions))
}

/// After a filter change, returns to page one. Past page one this also means
/// the loaded page no longer corresponds to the criteria, so a fresh first
/// page is fetched.
fn reset_pagination_if_needed<R: Viewable>(state: &mut RosterState<R>) -> Vec<RosterAction> {
    if state.pager.page() <= 1 {
        return Vec::new();
    }
    state.pager.reset();
    state.loading = true;
    vec![RosterAction::Fetch {
        query: state.page_query(),
    }]
}

fn select_action<R>(state: &mut RosterState<R>, action: ModerationAction, uid: &str)
where
    R: Viewable + Moderatable,
{
    let Some(record) = state.store.get(uid) else {
        tracing::debug!(uid = %uid, "moderation target absent; ignoring");
        return;
    };
    if action == ModerationAction::Approve
        && record.approval_status() != Some(ApprovalStatus::Pending)
    {
        // Either already approved or the resource has no approval concept.
        tracing::debug!(uid = %uid, "approve not applicable; staying idle");
        return;
    }
    if state.moderation.is_in_flight(uid) {
        tracing::debug!(uid = %uid, "mutation already in flight for identifier");
        return;
    }
    state.moderation.select(action, uid);
}

/// Confirms the pending intent: optimistic store mutation, rollback token,
/// dispatched action. A missing credential aborts before any of the three.
fn confirm_pending<R>(
    state: &mut RosterState<R>,
    session: &Session,
    actions: &mut Vec<RosterAction>,
) -> bool
where
    R: Viewable + Moderatable,
{
    let Some(intent) = state.moderation.take_pending() else {
        return false;
    };

    if !session.is_authenticated() {
        state.raise_banner(
            BannerKind::Auth,
            format!("cannot {}: admin credential missing", intent.action.label()),
        );
        return true;
    }

    let uid = intent.uid;
    match intent.action {
        ModerationAction::Approve => {
            let Some(index) = state.store.position(&uid) else {
                tracing::debug!(uid = %uid, "confirmed target vanished; ignoring");
                return true;
            };
            let before = state.store.records()[index].clone();
            state.store.update(&uid, |r| r.mark_approved(Utc::now()));
            state.moderation.begin(
                &uid,
                ModerationAction::Approve,
                RollbackToken {
                    record: before,
                    index,
                },
            );
            state.feed.push(format!("approving {uid}"));
            actions.push(RosterAction::Approve { uid });
        }
        ModerationAction::Delete => {
            let Some((index, record)) = state.store.remove(&uid) else {
                tracing::debug!(uid = %uid, "confirmed target vanished; ignoring");
                return true;
            };
            state.moderation.begin(
                &uid,
                ModerationAction::Delete,
                RollbackToken { record, index },
            );
            state.feed.push(format!("deleting {uid}"));
            actions.push(RosterAction::Delete { uid });
        }
    }

    true
}

fn apply_remote<R>(state: &mut RosterState<R>, response: RemoteResponse<R>) -> bool
where
    R: Viewable + Moderatable,
{
    match response {
        RemoteResponse::PageLoaded { records } => {
            state.loading = false;
            state.feed.push(format!("loaded {} records", records.len()));
            state.store.load(records);
            true
        }

        RemoteResponse::FetchFailed { message } => {
            // The previous collection stays on screen.
            state.loading = false;
            state.feed.push(format!("fetch failed: {message}"));
            state.raise_banner(BannerKind::Fetch, message);
            true
        }

        RemoteResponse::MutationApplied { uid, action } => {
            if state.moderation.resolve(&uid).is_none() {
                tracing::debug!(uid = %uid, "resolution for unknown mutation; ignoring");
                return false;
            }
            // The optimistic result stands; a stale failure banner would
            // contradict it.
            state.banner = None;
            state.feed.push(format!("{} applied for {uid}", action.label()));
            true
        }

        RemoteResponse::MutationRejected { uid, message, .. } => {
            // The ledger's recorded action drives the rollback, not the
            // response's echo of it.
            let Some((action, token)) = state.moderation.resolve(&uid) else {
                tracing::debug!(uid = %uid, "rejection for unknown mutation; ignoring");
                return false;
            };

            match action {
                ModerationAction::Approve => {
                    state.store.replace(token.record);
                }
                ModerationAction::Delete => {
                    state.store.insert_at(token.index, token.record);
                }
            }
            state
                .feed
                .push(format!("{} rejected for {uid}: {message}", action.label()));
            state.raise_banner(BannerKind::Mutation, message);
            true
        }

        RemoteResponse::RecordUpdated { record } => {
            state.feed.push(format!("updated {}", record.uid()));
            state.store.replace(record)
        }

        RemoteResponse::UpdateRejected { uid, message } => {
            state.feed.push(format!("update rejected for {uid}"));
            state.raise_banner(BannerKind::Mutation, message);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coordinator::Coordinator;
    use crate::domain::student::Student;
    use serde_json::json;

    fn coordinator(uid: &str, status: &str) -> Coordinator {
        serde_json::from_value(json!({ "uid": uid, "name": uid, "status": status })).unwrap()
    }

    fn student(uid: &str) -> Student {
        serde_json::from_value(json!({ "uid": uid, "name": uid })).unwrap()
    }

    fn authed() -> Session {
        Session::new(Some("token".to_string()))
    }

    fn coordinator_state(records: Vec<Coordinator>) -> RosterState<Coordinator> {
        let mut state = RosterState::new(10, 16);
        state.store.load(records);
        state
    }

    fn confirm_approve(state: &mut RosterState<Coordinator>, uid: &str) -> Vec<RosterAction> {
        handle_event(
            state,
            &authed(),
            RosterEvent::ActionSelected {
                action: ModerationAction::Approve,
                uid: uid.to_string(),
            },
        )
        .unwrap();
        let (_, actions) = handle_event(state, &authed(), RosterEvent::ConfirmPending).unwrap();
        actions
    }

    #[test]
    fn filter_change_past_page_one_resets_and_refetches() {
        let mut state: RosterState<Student> = RosterState::new(10, 16);
        state.pager.set_page(3);

        let (redraw, actions) = handle_event(
            &mut state,
            &authed(),
            RosterEvent::StandardSelected(StandardFilter::Grade(7)),
        )
        .unwrap();

        assert!(redraw);
        assert_eq!(state.pager.page(), 1);
        assert!(state.loading);
        assert_eq!(
            actions,
            vec![RosterAction::Fetch {
                query: crate::remote::api::PageQuery::first(10),
            }]
        );
    }

    #[test]
    fn filter_change_on_page_one_is_purely_local() {
        let mut state: RosterState<Student> = RosterState::new(10, 16);
        let (redraw, actions) = handle_event(
            &mut state,
            &authed(),
            RosterEvent::SearchChanged("ana".to_string()),
        )
        .unwrap();
        assert!(redraw);
        assert!(actions.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn confirmed_approve_is_optimistic_and_dispatches() {
        let mut state = coordinator_state(vec![coordinator("c1", "pending")]);
        let actions = confirm_approve(&mut state, "c1");

        assert_eq!(
            actions,
            vec![RosterAction::Approve {
                uid: "c1".to_string()
            }]
        );
        let record = state.store.get("c1").unwrap();
        assert_eq!(record.status, ApprovalStatus::Approved);
        assert!(record.approved_at.is_some());
        assert!(state.moderation.is_in_flight("c1"));
    }

    #[test]
    fn rejected_approve_rolls_back_to_initial_record() {
        let mut state = coordinator_state(vec![coordinator("c1", "pending")]);
        let initial = state.store.get("c1").cloned().unwrap();
        confirm_approve(&mut state, "c1");

        handle_event(
            &mut state,
            &authed(),
            RosterEvent::Remote(RemoteResponse::MutationRejected {
                uid: "c1".to_string(),
                action: ModerationAction::Approve,
                message: "server said no".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(state.store.get("c1"), Some(&initial));
        assert!(!state.moderation.is_in_flight("c1"));
        assert_eq!(state.banner.as_ref().unwrap().kind, BannerKind::Mutation);
    }

    #[test]
    fn rejected_delete_restores_record_in_place() {
        let mut state: RosterState<Student> = RosterState::new(10, 16);
        state
            .store
            .load(vec![student("s1"), student("s2"), student("s3")]);

        handle_event(
            &mut state,
            &authed(),
            RosterEvent::ActionSelected {
                action: ModerationAction::Delete,
                uid: "s2".to_string(),
            },
        )
        .unwrap();
        let (_, actions) =
            handle_event(&mut state, &authed(), RosterEvent::ConfirmPending).unwrap();
        assert_eq!(
            actions,
            vec![RosterAction::Delete {
                uid: "s2".to_string()
            }]
        );
        assert!(state.store.get("s2").is_none());

        handle_event(
            &mut state,
            &authed(),
            RosterEvent::Remote(RemoteResponse::MutationRejected {
                uid: "s2".to_string(),
                action: ModerationAction::Delete,
                message: "rejected".to_string(),
            }),
        )
        .unwrap();

        let order: Vec<&str> = state.store.records().iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(order, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn confirm_without_credential_raises_auth_banner_only() {
        let mut state = coordinator_state(vec![coordinator("c1", "pending")]);
        let initial = state.store.get("c1").cloned().unwrap();

        handle_event(
            &mut state,
            &Session::default(),
            RosterEvent::ActionSelected {
                action: ModerationAction::Approve,
                uid: "c1".to_string(),
            },
        )
        .unwrap();
        let (redraw, actions) =
            handle_event(&mut state, &Session::default(), RosterEvent::ConfirmPending).unwrap();

        assert!(redraw);
        assert!(actions.is_empty());
        assert_eq!(state.store.get("c1"), Some(&initial));
        assert!(!state.moderation.is_in_flight("c1"));
        assert!(state.moderation.pending().is_none());
        assert_eq!(state.banner.as_ref().unwrap().kind, BannerKind::Auth);
    }

    #[test]
    fn approve_on_already_approved_record_stays_idle() {
        let mut state = coordinator_state(vec![coordinator("c1", "approved")]);
        handle_event(
            &mut state,
            &authed(),
            RosterEvent::ActionSelected {
                action: ModerationAction::Approve,
                uid: "c1".to_string(),
            },
        )
        .unwrap();
        assert!(state.moderation.pending().is_none());
    }

    #[test]
    fn fetch_failure_keeps_previous_collection() {
        let mut state: RosterState<Student> = RosterState::new(10, 16);
        state.store.load(vec![student("s1")]);
        state.loading = true;

        handle_event(
            &mut state,
            &authed(),
            RosterEvent::Remote(RemoteResponse::FetchFailed {
                message: "timeout".to_string(),
            }),
        )
        .unwrap();

        assert!(!state.loading);
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.banner.as_ref().unwrap().kind, BannerKind::Fetch);
    }

    #[test]
    fn out_of_order_resolutions_touch_only_their_target() {
        let mut state = coordinator_state(vec![
            coordinator("c1", "pending"),
            coordinator("c2", "pending"),
        ]);
        let initial_c2 = state.store.get("c2").cloned().unwrap();
        confirm_approve(&mut state, "c1");
        confirm_approve(&mut state, "c2");

        // c2's rejection arrives before c1's success.
        handle_event(
            &mut state,
            &authed(),
            RosterEvent::Remote(RemoteResponse::MutationRejected {
                uid: "c2".to_string(),
                action: ModerationAction::Approve,
                message: "no".to_string(),
            }),
        )
        .unwrap();
        handle_event(
            &mut state,
            &authed(),
            RosterEvent::Remote(RemoteResponse::MutationApplied {
                uid: "c1".to_string(),
                action: ModerationAction::Approve,
            }),
        )
        .unwrap();

        assert_eq!(state.store.get("c2"), Some(&initial_c2));
        assert_eq!(
            state.store.get("c1").unwrap().status,
            ApprovalStatus::Approved
        );
        assert!(!state.moderation.is_in_flight("c1"));
        assert!(!state.moderation.is_in_flight("c2"));
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let mut state = coordinator_state(vec![coordinator("c1", "pending")]);
        let (redraw, _) = handle_event(
            &mut state,
            &authed(),
            RosterEvent::Remote(RemoteResponse::MutationApplied {
                uid: "ghost".to_string(),
                action: ModerationAction::Delete,
            }),
        )
        .unwrap();
        assert!(!redraw);
    }

    #[test]
    fn menu_closes_on_outside_interaction() {
        let mut state: RosterState<Student> = RosterState::new(10, 16);
        state.store.load(vec![student("s1")]);

        handle_event(
            &mut state,
            &authed(),
            RosterEvent::MenuToggled("s1".to_string()),
        )
        .unwrap();
        assert!(state.menu.is_open("s1"));

        let (redraw, _) =
            handle_event(&mut state, &authed(), RosterEvent::OutsideInteraction).unwrap();
        assert!(redraw);
        assert_eq!(state.menu.open_row(), None);
    }

    #[test]
    fn page_request_emits_fetch_with_boundary_cursor() {
        let mut state: RosterState<Student> = RosterState::new(3, 16);
        state
            .store
            .load(vec![student("s1"), student("s2"), student("s3")]);

        let (_, actions) =
            handle_event(&mut state, &authed(), RosterEvent::PageRequested(2)).unwrap();

        assert!(state.loading);
        assert_eq!(
            actions,
            vec![RosterAction::Fetch {
                query: crate::remote::api::PageQuery {
                    limit: Some(3),
                    cursor: Some("s3".to_string()),
                },
            }]
        );
    }
}
