//! Callback-request record model.
//!
//! Prospective users can request a callback from the public site; staff review
//! the queue in the console. Unpaginated and display-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::record::{Moderatable, RosterRecord, Viewable};

/// One callback request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callback {
    /// Stable unique identifier (the backend names it `id` for this resource).
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub mobile: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RosterRecord for Callback {
    const COLLECTION_KEY: &'static str = "requestCallbacks";
    const RESOURCE: &'static str = "request-callbacks";

    fn uid(&self) -> &str {
        &self.id
    }
}

impl Viewable for Callback {
    fn search_fields(&self) -> [Option<&str>; 2] {
        [self.name.as_deref(), self.mobile.as_deref()]
    }
}

impl Moderatable for Callback {}
