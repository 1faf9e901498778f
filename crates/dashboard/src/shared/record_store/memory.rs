//! In-process record store
//!
//! Keeps collections in insertion order behind a `RefCell` (the dashboard is
//! single-threaded). Used in offline mode and as the store double in tests:
//! it records every operation and can be told to fail specific calls.

use super::{Patch, RecordStore, StoreError};
use async_trait::async_trait;
use contracts::shared::record::{RawRecord, ID_FIELD};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

const CREATED_FIELD: &str = "_createdDate";
const UPDATED_FIELD: &str = "_updatedDate";

/// Operation recorded by the memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Query { collection: String },
    Insert { collection: String, id: String },
    Patch { collection: String, id: String },
    Remove { collection: String, id: String },
    Batch { collection: String, ids: Vec<String> },
}

#[derive(Debug, Default)]
struct Failures {
    queries: bool,
    inserts: bool,
    removes: bool,
    patch_ids: HashSet<String>,
    /// 1-based numbers of `patch` calls that fail
    patch_calls: HashSet<usize>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<RawRecord>>,
    ops: Vec<StoreOp>,
    patch_calls: usize,
    failures: Failures,
}

#[derive(Debug)]
pub struct MemoryRecordStore {
    inner: RefCell<Inner>,
    batch_support: bool,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner::default()),
            batch_support: true,
        }
    }

    /// Store that rejects `patch_batch`, forcing callers onto single patches
    pub fn without_batch() -> Self {
        Self {
            batch_support: false,
            ..Self::new()
        }
    }

    /// Replace a collection with the given JSON objects (non-objects are ignored)
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        let records = records
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.inner
            .borrow_mut()
            .collections
            .insert(collection.to_string(), records);
    }

    pub fn records(&self, collection: &str) -> Vec<RawRecord> {
        self.inner
            .borrow()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn record(&self, collection: &str, id: &str) -> Option<RawRecord> {
        self.records(collection)
            .into_iter()
            .find(|r| r.get(ID_FIELD).and_then(Value::as_str) == Some(id))
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.borrow().ops.clone()
    }

    /// Operations other than queries
    pub fn writes(&self) -> Vec<StoreOp> {
        self.ops()
            .into_iter()
            .filter(|op| !matches!(op, StoreOp::Query { .. }))
            .collect()
    }

    pub fn patch_calls(&self) -> usize {
        self.inner.borrow().patch_calls
    }

    pub fn fail_queries(&self, fail: bool) {
        self.inner.borrow_mut().failures.queries = fail;
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.inner.borrow_mut().failures.inserts = fail;
    }

    pub fn fail_removes(&self, fail: bool) {
        self.inner.borrow_mut().failures.removes = fail;
    }

    /// Every patch of this record id fails
    pub fn fail_patch_for(&self, id: &str) {
        self.inner
            .borrow_mut()
            .failures
            .patch_ids
            .insert(id.to_string());
    }

    /// The n-th `patch` call (1-based, counted from now on) fails
    pub fn fail_patch_call(&self, n: usize) {
        let mut inner = self.inner.borrow_mut();
        let call = inner.patch_calls + n;
        inner.failures.patch_calls.insert(call);
    }

    pub fn clear_failures(&self) {
        self.inner.borrow_mut().failures = Failures::default();
    }
}

fn id_of(record: &RawRecord) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

fn now_stamp() -> Value {
    Value::String(chrono::Utc::now().to_rfc3339())
}

fn apply_fields(
    records: &mut [RawRecord],
    collection: &str,
    patch: &Patch,
) -> Result<RawRecord, StoreError> {
    let record = records
        .iter_mut()
        .find(|r| id_of(r) == Some(patch.id.as_str()))
        .ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: patch.id.clone(),
        })?;

    for (name, value) in &patch.fields {
        record.insert(name.clone(), value.clone());
    }
    record.insert(UPDATED_FIELD.to_string(), now_stamp());
    Ok(record.clone())
}

#[async_trait(?Send)]
impl RecordStore for MemoryRecordStore {
    async fn query_all(&self, collection: &str) -> Result<Vec<RawRecord>, StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(StoreOp::Query {
            collection: collection.to_string(),
        });
        if inner.failures.queries {
            return Err(StoreError::Transport(format!("query {} failed", collection)));
        }
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, mut fields: RawRecord) -> Result<RawRecord, StoreError> {
        let mut inner = self.inner.borrow_mut();
        let id = match id_of(&fields) {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        inner.ops.push(StoreOp::Insert {
            collection: collection.to_string(),
            id: id.clone(),
        });
        if inner.failures.inserts {
            return Err(StoreError::Rejected(format!("insert into {} failed", collection)));
        }

        fields.insert(ID_FIELD.to_string(), Value::String(id));
        fields.insert(CREATED_FIELD.to_string(), now_stamp());
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(fields.clone());
        Ok(fields)
    }

    async fn patch(&self, collection: &str, patch: Patch) -> Result<RawRecord, StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.patch_calls += 1;
        let call = inner.patch_calls;
        inner.ops.push(StoreOp::Patch {
            collection: collection.to_string(),
            id: patch.id.clone(),
        });
        if inner.failures.patch_calls.contains(&call) || inner.failures.patch_ids.contains(&patch.id) {
            return Err(StoreError::Transport(format!(
                "patch {}/{} failed",
                collection, patch.id
            )));
        }

        let records = inner.collections.entry(collection.to_string()).or_default();
        apply_fields(records, collection, &patch)
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<RawRecord, StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(StoreOp::Remove {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        if inner.failures.removes {
            return Err(StoreError::Rejected(format!("remove {}/{} failed", collection, id)));
        }

        let records = inner.collections.entry(collection.to_string()).or_default();
        let pos = records
            .iter()
            .position(|r| id_of(r) == Some(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        Ok(records.remove(pos))
    }

    async fn patch_batch(
        &self,
        collection: &str,
        patches: Vec<Patch>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        if !self.batch_support {
            return Err(StoreError::Unsupported("patch_batch"));
        }

        let mut inner = self.inner.borrow_mut();
        inner.ops.push(StoreOp::Batch {
            collection: collection.to_string(),
            ids: patches.iter().map(|p| p.id.clone()).collect(),
        });
        if patches
            .iter()
            .any(|p| inner.failures.patch_ids.contains(&p.id))
        {
            return Err(StoreError::Transport(format!("batch on {} failed", collection)));
        }

        // All-or-nothing: work on a copy and commit only when every patch applies
        let mut records = inner.collections.get(collection).cloned().unwrap_or_default();
        let mut updated = Vec::with_capacity(patches.len());
        for patch in &patches {
            updated.push(apply_fields(&mut records, collection, patch)?);
        }
        inner.collections.insert(collection.to_string(), records);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> MemoryRecordStore {
        let store = MemoryRecordStore::new();
        store.seed(
            "faq",
            vec![
                json!({ "_id": "a", "order": 1 }),
                json!({ "_id": "b", "order": 2 }),
            ],
        );
        store
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = seeded();
        let mut fields = RawRecord::new();
        fields.insert("question".into(), json!("new?"));
        let created = store.insert("faq", fields).await.unwrap();

        let id = created["_id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert!(created.contains_key("_createdDate"));
        assert_eq!(store.records("faq").len(), 3);
        assert!(store.record("faq", &id).is_some());
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let store = seeded();
        let patches = vec![
            Patch::new("a").set_field("order", 2),
            Patch::new("missing").set_field("order", 1),
        ];
        let result = store.patch_batch("faq", patches).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert_eq!(store.record("faq", "a").unwrap()["order"], json!(1));
    }

    #[tokio::test]
    async fn test_injected_patch_failure() {
        let store = seeded();
        store.fail_patch_call(2);

        assert!(store.patch("faq", Patch::new("a").set_field("order", 9)).await.is_ok());
        assert!(store.patch("faq", Patch::new("b").set_field("order", 9)).await.is_err());
        assert!(store.patch("faq", Patch::new("b").set_field("order", 9)).await.is_ok());
        assert_eq!(store.patch_calls(), 3);
    }

    #[tokio::test]
    async fn test_without_batch_is_unsupported() {
        let store = MemoryRecordStore::without_batch();
        let result = store.patch_batch("faq", vec![]).await;
        assert_eq!(result, Err(StoreError::Unsupported("patch_batch")));
    }

    #[tokio::test]
    async fn test_remove_missing_record() {
        let store = seeded();
        assert!(store.remove("faq", "a").await.is_ok());
        assert!(matches!(
            store.remove("faq", "a").await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
