//! Coordinator record model.
//!
//! Coordinators carry the approval workflow: their status is `pending` until
//! a staff member approves them, and approval is monotonic — once approved,
//! the approve action is permanently disabled. Payment details are fetched
//! lazily per coordinator and are never part of the base record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::record::{ApprovalStatus, Moderatable, RosterRecord, Viewable};

/// Earnings aggregate shown in the coordinator table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Earnings {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub incentives: f64,
    #[serde(default)]
    pub bonus: f64,
}

/// Postal address triplet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Bank payout details, fetched on demand for a single coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc: Option<String>,
}

/// A coordinator roster record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinator {
    /// Stable unique identifier.
    pub uid: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<Address>,

    #[serde(default)]
    pub category: Option<String>,

    /// Approval status; absent upstream means pending.
    #[serde(default)]
    pub status: ApprovalStatus,

    /// Set when the approve action lands, optimistically or upstream.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub earnings: Option<Earnings>,

    /// Upstream fields the console does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RosterRecord for Coordinator {
    const COLLECTION_KEY: &'static str = "coordinators";
    const RESOURCE: &'static str = "coordinator";

    fn uid(&self) -> &str {
        &self.uid
    }
}

impl Viewable for Coordinator {
    fn search_fields(&self) -> [Option<&str>; 2] {
        [self.name.as_deref(), self.email.as_deref()]
    }
}

impl Moderatable for Coordinator {
    fn approval_status(&self) -> Option<ApprovalStatus> {
        Some(self.status)
    }

    fn mark_approved(&mut self, at: DateTime<Utc>) {
        self.status = ApprovalStatus::Approved;
        self.approved_at = Some(at);
    }
}
