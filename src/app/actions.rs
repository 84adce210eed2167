//! Side effects emitted by the event handler.
//!
//! The handler never performs I/O. It returns a sequence of actions that the
//! embedding runtime executes against the record source and mutation sink,
//! feeding each result back in as a remote-response event.

use serde_json::{Map, Value};

use crate::remote::api::PageQuery;

/// A side effect for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterAction {
    /// Fetch a page of records with the given query.
    Fetch {
        query: PageQuery,
    },

    /// Dispatch an approve mutation for the record.
    Approve {
        uid: String,
    },

    /// Dispatch a delete mutation for the record.
    Delete {
        uid: String,
    },

    /// Dispatch a field update; the authoritative record comes back in the
    /// response.
    UpdateFields {
        uid: String,
        patch: Map<String, Value>,
    },
}
