//! Record source and mutation sink contracts, and the response protocol.
//!
//! The roster core never talks to the network directly: it emits actions that
//! an embedding runtime executes against these two narrow interfaces, and the
//! results come back as [`RemoteResponse`] events fed into the same
//! single-threaded update sequence. Responses are applied in arrival order,
//! which may differ from request-issue order when several mutations are in
//! flight — each resolution only touches its own target identifier, so the
//! core tolerates the reordering.

use serde_json::{Map, Value};

use crate::app::moderation::ModerationAction;
use crate::domain::coordinator::PaymentDetails;
use crate::domain::error::Result;
use crate::domain::record::RosterRecord;
use crate::session::Session;

/// Query parameters for one fetch.
///
/// Paginated resources send `{limit, cursor}`; unpaginated ones send nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Page size; `None` for unpaginated resources.
    pub limit: Option<usize>,

    /// Opaque continuation token — the identifier the next page starts after.
    /// `None` for the first page and for unpaginated resources.
    pub cursor: Option<String>,
}

impl PageQuery {
    /// Query for an unpaginated resource (fetch everything).
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Query for the first page of a paginated resource.
    #[must_use]
    pub fn first(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            cursor: None,
        }
    }
}

/// Decoded result of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPayload<R> {
    /// Records in upstream order; empty when the payload was non-conforming.
    pub items: Vec<R>,

    /// Continuation token advertised by the server, when any.
    pub next_cursor: Option<String>,
}

/// Fetch-by-query interface over one resource type.
pub trait RecordSource<R: RosterRecord> {
    /// Fetches a page of records.
    ///
    /// Non-conforming payloads degrade to an empty collection with a logged
    /// diagnostic; only transport failures produce an error.
    fn fetch(
        &self,
        session: &Session,
        query: &PageQuery,
    ) -> impl std::future::Future<Output = Result<FetchPayload<R>>> + Send;
}

/// Apply-action-by-id interface.
///
/// Every method requires the bearer credential in `session`; its absence is a
/// hard precondition failure and no request is attempted.
pub trait MutationSink {
    /// Approves the record with the given identifier.
    fn approve(
        &self,
        session: &Session,
        resource: &str,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Deletes the record with the given identifier.
    fn delete(
        &self,
        session: &Session,
        resource: &str,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Merges a field patch into the record, returning the authoritative
    /// updated record from the server.
    fn update_fields<R: RosterRecord>(
        &self,
        session: &Session,
        uid: &str,
        patch: &Map<String, Value>,
    ) -> impl std::future::Future<Output = Result<R>> + Send;

    /// Fetches a coordinator's payout details on demand.
    fn payment_details(
        &self,
        session: &Session,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<PaymentDetails>> + Send;
}

/// Resolutions delivered back into the event handler.
///
/// Produced by the embedding runtime from [`RecordSource`] / [`MutationSink`]
/// results, one response per issued action.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse<R> {
    /// A fetch resolved; the collection replaces the store wholesale.
    PageLoaded {
        /// Decoded records (possibly empty after shape degradation).
        records: Vec<R>,
    },

    /// A fetch failed at the transport level.
    FetchFailed {
        /// Human-readable description for the banner.
        message: String,
    },

    /// An approve/delete mutation was accepted; the optimistic update stands.
    MutationApplied {
        uid: String,
        action: ModerationAction,
    },

    /// An approve/delete mutation was rejected; the optimistic update must be
    /// rolled back.
    MutationRejected {
        uid: String,
        action: ModerationAction,
        message: String,
    },

    /// A field update was accepted; `record` is the authoritative result.
    RecordUpdated { record: R },

    /// A field update was rejected. There is no optimistic update to roll
    /// back — the edit flow applies server state only on success.
    UpdateRejected { uid: String, message: String },
}
