//! Authoritative in-memory copy of fetched records.
//!
//! One [`ResourceStore`] holds the last-fetched collection for a single
//! resource type and owns all writes to it. Fetch results replace the
//! collection wholesale; moderation and edit flows mutate individual records
//! by identifier. Everything is synchronous over the in-memory collection —
//! there is no persistence.
//!
//! # Invariants
//!
//! - Identifiers are unique within a snapshot: [`ResourceStore::load`]
//!   drops duplicate uids (first occurrence wins, logged) and
//!   [`ResourceStore::insert_at`] refuses to reintroduce a live uid.
//! - Records keep their upstream order; the view pipeline relies on that
//!   order as the tie-break for stable sorting.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::record::RosterRecord;

/// In-memory record collection for one resource type.
#[derive(Debug, Clone)]
pub struct ResourceStore<R> {
    records: Vec<R>,
}

impl<R> Default for ResourceStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: RosterRecord> ResourceStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection wholesale with a fetched page.
    ///
    /// Duplicate identifiers are dropped (first occurrence wins) so that the
    /// uniqueness invariant holds even against a misbehaving upstream.
    pub fn load(&mut self, records: Vec<R>) {
        let incoming = records.len();
        let mut seen: Vec<&str> = Vec::with_capacity(records.len());
        let mut deduped: Vec<R> = Vec::with_capacity(records.len());

        for record in &records {
            if seen.contains(&record.uid()) {
                tracing::warn!(
                    resource = R::RESOURCE,
                    uid = %record.uid(),
                    "dropping duplicate record identifier"
                );
                continue;
            }
            seen.push(record.uid());
            deduped.push(record.clone());
        }

        tracing::debug!(
            resource = R::RESOURCE,
            incoming = incoming,
            loaded = deduped.len(),
            "store loaded"
        );
        self.records = deduped;
    }

    /// The current snapshot, in upstream order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn get(&self, uid: &str) -> Option<&R> {
        self.records.iter().find(|r| r.uid() == uid)
    }

    /// Index of a record within the snapshot.
    #[must_use]
    pub fn position(&self, uid: &str) -> Option<usize> {
        self.records.iter().position(|r| r.uid() == uid)
    }

    /// Applies a typed mutation to the record matching `uid`.
    ///
    /// Returns `false` (no-op) when the identifier is absent.
    pub fn update(&mut self, uid: &str, f: impl FnOnce(&mut R)) -> bool {
        match self.records.iter_mut().find(|r| r.uid() == uid) {
            Some(record) => {
                f(record);
                true
            }
            None => {
                tracing::debug!(resource = R::RESOURCE, uid = %uid, "update target absent");
                false
            }
        }
    }

    /// Merges a JSON field patch into the record matching `uid`, preserving
    /// all other fields. No-op if the identifier is absent or the patched
    /// record no longer decodes.
    pub fn apply_patch(&mut self, uid: &str, patch: &Map<String, Value>) -> bool {
        let Some(index) = self.position(uid) else {
            tracing::debug!(resource = R::RESOURCE, uid = %uid, "patch target absent");
            return false;
        };

        match merge_patch(&self.records[index], patch) {
            Some(updated) => {
                self.records[index] = updated;
                true
            }
            None => {
                tracing::warn!(
                    resource = R::RESOURCE,
                    uid = %uid,
                    "patch produced an undecodable record; keeping original"
                );
                false
            }
        }
    }

    /// Swaps in a full replacement record, matched by its own identifier.
    ///
    /// Used when the mutation sink returns the authoritative updated record.
    pub fn replace(&mut self, record: R) -> bool {
        match self.position(record.uid()) {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    /// Deletes the record matching `uid`, returning it with its index so a
    /// rollback can restore it in place. No-op if absent.
    pub fn remove(&mut self, uid: &str) -> Option<(usize, R)> {
        let index = self.position(uid)?;
        Some((index, self.records.remove(index)))
    }

    /// Restores a record at its original position (clamped to the current
    /// length). Refused when the identifier is already present.
    pub fn insert_at(&mut self, index: usize, record: R) {
        if self.get(record.uid()).is_some() {
            tracing::warn!(
                resource = R::RESOURCE,
                uid = %record.uid(),
                "refusing to restore record over a live identifier"
            );
            return;
        }
        let index = index.min(self.records.len());
        self.records.insert(index, record);
    }
}

/// Merges a JSON object patch into a record, field by field.
///
/// The record is round-tripped through `serde_json::Value` so the merge works
/// uniformly for every record shape; returns `None` when the merged object no
/// longer deserializes into `R`.
#[must_use]
pub fn merge_patch<R>(record: &R, patch: &Map<String, Value>) -> Option<R>
where
    R: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(record).ok()?;
    let object = value.as_object_mut()?;
    for (key, patched) in patch {
        object.insert(key.clone(), patched.clone());
    }
    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::Student;
    use serde_json::json;

    fn student(uid: &str, name: &str) -> Student {
        serde_json::from_value(json!({ "uid": uid, "name": name })).unwrap()
    }

    #[test]
    fn load_drops_duplicate_uids() {
        let mut store = ResourceStore::new();
        store.load(vec![
            student("s1", "Ana"),
            student("s2", "Bob"),
            student("s1", "Imposter"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("s1").unwrap().name.as_deref(), Some("Ana"));
    }

    #[test]
    fn apply_patch_preserves_other_fields() {
        let mut store = ResourceStore::new();
        store.load(vec![serde_json::from_value(json!({
            "uid": "s1",
            "name": "Ana",
            "schoolName": "Hillcrest",
            "referralSource": "school-drive",
        }))
        .unwrap()]);

        let patch = json!({ "name": "Ana Maria" });
        assert!(store.apply_patch("s1", patch.as_object().unwrap()));

        let record: &Student = store.get("s1").unwrap();
        assert_eq!(record.name.as_deref(), Some("Ana Maria"));
        assert_eq!(record.school_name.as_deref(), Some("Hillcrest"));
        assert_eq!(
            record.extra.get("referralSource").and_then(Value::as_str),
            Some("school-drive")
        );
    }

    #[test]
    fn patch_on_absent_uid_is_noop() {
        let mut store: ResourceStore<Student> = ResourceStore::new();
        store.load(vec![student("s1", "Ana")]);
        let patch = json!({ "name": "x" });
        assert!(!store.apply_patch("ghost", patch.as_object().unwrap()));
        assert_eq!(store.get("s1").unwrap().name.as_deref(), Some("Ana"));
    }

    #[test]
    fn remove_and_restore_round_trip() {
        let mut store = ResourceStore::new();
        store.load(vec![
            student("s1", "Ana"),
            student("s2", "Bob"),
            student("s3", "Cyd"),
        ]);

        let (index, removed) = store.remove("s2").unwrap();
        assert_eq!(index, 1);
        assert_eq!(store.len(), 2);
        assert!(store.remove("s2").is_none());

        store.insert_at(index, removed);
        let order: Vec<&str> = store.records().iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(order, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn insert_at_refuses_live_uid() {
        let mut store = ResourceStore::new();
        store.load(vec![student("s1", "Ana")]);
        store.insert_at(0, student("s1", "Imposter"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("s1").unwrap().name.as_deref(), Some("Ana"));
    }

    #[test]
    fn replace_swaps_full_record() {
        let mut store = ResourceStore::new();
        store.load(vec![student("s1", "Ana")]);
        assert!(store.replace(student("s1", "Ana Maria")));
        assert_eq!(store.get("s1").unwrap().name.as_deref(), Some("Ana Maria"));
        assert!(!store.replace(student("ghost", "Nobody")));
    }
}
