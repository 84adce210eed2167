//! Student record model.
//!
//! Students are the primary paginated resource. The upstream payload is a
//! loosely shaped JSON object; every display field is optional and unknown
//! fields are preserved in a flattened map so the edit/update round-trip never
//! drops data the console does not model.
//!
//! The marks structure is an explicitly ordered sequence of attempts per
//! category, making "first attempt" (the value the score extraction uses)
//! well-defined.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::record::{Moderatable, RosterRecord, Viewable};
use crate::domain::score::{self, ScoreBasis};

/// One scored attempt within a marks category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Attempt identifier assigned upstream.
    pub id: String,

    /// Score value; defaults to 0 when the field is absent.
    #[serde(default)]
    pub score: f64,
}

/// Marks with two independent categories, each an ordered attempt sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marks {
    /// Practice attempts, in attempt order.
    #[serde(default)]
    pub mock: Vec<Attempt>,

    /// Live attempts, in attempt order.
    #[serde(default)]
    pub live: Vec<Attempt>,
}

/// Rank number within one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    /// Position, 1-based; `None` when not yet ranked.
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Ranks keyed by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankScopes {
    #[serde(default)]
    pub global: Option<RankEntry>,
    #[serde(default)]
    pub country: Option<RankEntry>,
    #[serde(default)]
    pub state: Option<RankEntry>,
}

/// Nested rank structure; only the live competition carries ranks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranks {
    #[serde(default)]
    pub live: Option<RankScopes>,
}

/// Whether the student's registration fee has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

/// Issued credential code container; `code` is nullable upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCode {
    #[serde(default)]
    pub code: Option<String>,
}

/// A student roster record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable unique identifier.
    pub uid: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    /// Grade level, one of a fixed small set (5 through 10).
    ///
    /// The backend is inconsistent about encoding this as a number or a
    /// string, so deserialization accepts both.
    #[serde(default, deserialize_with = "de_standard")]
    pub standard: Option<u8>,

    #[serde(default)]
    pub school_name: Option<String>,

    #[serde(default)]
    pub marks: Option<Marks>,

    #[serde(default)]
    pub ranks: Option<Ranks>,

    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,

    #[serde(default)]
    pub certificate_codes: Option<CredentialCode>,

    /// Upstream fields the console does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts a grade level encoded as either a JSON number or a string.
fn de_standard<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u8),
        Text(String),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

impl RosterRecord for Student {
    const COLLECTION_KEY: &'static str = "students";
    const RESOURCE: &'static str = "students";

    fn uid(&self) -> &str {
        &self.uid
    }
}

impl Viewable for Student {
    fn search_fields(&self) -> [Option<&str>; 2] {
        [self.name.as_deref(), self.school_name.as_deref()]
    }

    fn standard(&self) -> Option<u8> {
        self.standard
    }

    fn score(&self, basis: ScoreBasis) -> f64 {
        score::extract(self.marks.as_ref(), basis)
    }
}

// Students have no approval concept; only delete applies.
impl Moderatable for Student {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_standard() {
        let student: Student = serde_json::from_value(serde_json::json!({
            "uid": "s1",
            "name": "Ana",
            "standard": "7",
        }))
        .unwrap();
        assert_eq!(student.standard, Some(7));
    }

    #[test]
    fn preserves_unknown_fields() {
        let raw = serde_json::json!({
            "uid": "s1",
            "name": "Ana",
            "referralSource": "school-drive",
        });
        let student: Student = serde_json::from_value(raw).unwrap();
        assert_eq!(
            student.extra.get("referralSource").and_then(Value::as_str),
            Some("school-drive")
        );

        let back = serde_json::to_value(&student).unwrap();
        assert_eq!(
            back.get("referralSource").and_then(Value::as_str),
            Some("school-drive")
        );
    }

    #[test]
    fn marks_keep_attempt_order() {
        let student: Student = serde_json::from_value(serde_json::json!({
            "uid": "s1",
            "marks": {
                "mock": [
                    {"id": "first", "score": 10.0},
                    {"id": "second", "score": 90.0}
                ]
            }
        }))
        .unwrap();
        let marks = student.marks.unwrap();
        assert_eq!(marks.mock[0].id, "first");
        assert!(marks.live.is_empty());
    }
}
