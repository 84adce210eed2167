//! Shape-tolerant payload decoding.
//!
//! The admin API wraps each collection in an object keyed by a well-known,
//! resource-specific name. A payload missing that key — or carrying something
//! other than an array under it — is a shape error: it is logged and treated
//! as an empty collection, never raised to the caller, so a malformed response
//! cannot block the rest of the console.

use serde_json::Value;

use crate::domain::record::RosterRecord;

/// Decodes the record array under the resource's well-known key.
///
/// Degrades to an empty vector (with a logged diagnostic) when the key is
/// missing or not an array. Individual records that fail to decode are
/// skipped and logged; the rest of the page survives.
#[must_use]
pub fn decode_collection<R: RosterRecord>(payload: &Value) -> Vec<R> {
    let Some(items) = payload.get(R::COLLECTION_KEY).and_then(Value::as_array) else {
        tracing::warn!(
            resource = R::RESOURCE,
            key = R::COLLECTION_KEY,
            "payload missing expected record array; treating as empty"
        );
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|raw| match serde_json::from_value::<R>(raw.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    resource = R::RESOURCE,
                    error = %e,
                    "skipping record that failed to decode"
                );
                None
            }
        })
        .collect()
}

/// Continuation token advertised alongside the collection, when any.
#[must_use]
pub fn decode_next_cursor(payload: &Value) -> Option<String> {
    payload
        .get("nextCursor")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::school::School;
    use crate::domain::student::Student;
    use serde_json::json;

    #[test]
    fn missing_collection_key_degrades_to_empty() {
        let payload = json!({ "message": "ok", "data": 3 });
        let records: Vec<Student> = decode_collection(&payload);
        assert!(records.is_empty());
    }

    #[test]
    fn non_array_collection_degrades_to_empty() {
        let payload = json!({ "students": "oops" });
        let records: Vec<Student> = decode_collection(&payload);
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let payload = json!({
            "students": [
                { "uid": "s1", "name": "Ana" },
                { "name": "no uid, does not decode" },
                { "uid": "s2" }
            ]
        });
        let records: Vec<Student> = decode_collection(&payload);
        let uids: Vec<&str> = records.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["s1", "s2"]);
    }

    #[test]
    fn school_uses_singular_collection_key() {
        let payload = json!({
            "school": [ { "uid": "sch1", "schoolName": "Hillcrest" } ]
        });
        let records: Vec<School> = decode_collection(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].school_name.as_deref(), Some("Hillcrest"));
    }

    #[test]
    fn next_cursor_is_optional() {
        assert_eq!(
            decode_next_cursor(&json!({ "students": [], "nextCursor": "s42" })),
            Some("s42".to_string())
        );
        assert_eq!(decode_next_cursor(&json!({ "students": [] })), None);
    }
}
