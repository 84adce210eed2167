//! School record model.
//!
//! Schools are an unpaginated, display-oriented resource. The backend returns
//! them under the singular `school` key; that quirk is captured in
//! [`RosterRecord::COLLECTION_KEY`] rather than worked around at the call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::record::{Moderatable, RosterRecord, Viewable};

/// A registered school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    /// Stable unique identifier.
    pub uid: String,

    #[serde(default)]
    pub school_name: Option<String>,

    #[serde(default)]
    pub principal_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Upstream fields the console does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RosterRecord for School {
    // The backend answers with a singular key for this resource.
    const COLLECTION_KEY: &'static str = "school";
    const RESOURCE: &'static str = "schools";

    fn uid(&self) -> &str {
        &self.uid
    }
}

impl Viewable for School {
    fn search_fields(&self) -> [Option<&str>; 2] {
        [self.school_name.as_deref(), self.principal_name.as_deref()]
    }
}

impl Moderatable for School {}
