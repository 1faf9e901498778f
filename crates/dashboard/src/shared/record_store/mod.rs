//! Record store boundary
//!
//! The dashboard never owns persistence: every read and write goes through a
//! `RecordStore`. Records cross this boundary untyped (`RawRecord`) and are
//! decoded by the caller with `CollectionRecord::decode`.

#[cfg(target_arch = "wasm32")]
pub mod http;
pub mod memory;

use async_trait::async_trait;
use contracts::shared::record::{CollectionRecord, DecodeError, RawRecord};
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryRecordStore;

/// Ошибки хранилища записей
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("record {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("store rejected the request: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation not supported by this store: {0}")]
    Unsupported(&'static str),

    #[error("invalid record: {0}")]
    Invalid(#[from] DecodeError),
}

/// Partial update of one record: field sets applied atomically per call
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub id: String,
    pub fields: RawRecord,
}

impl Patch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: RawRecord::new(),
        }
    }

    pub fn set_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

#[async_trait(?Send)]
pub trait RecordStore {
    /// All records of a collection
    async fn query_all(&self, collection: &str) -> Result<Vec<RawRecord>, StoreError>;

    /// Create a record; the store assigns `_id`
    async fn insert(&self, collection: &str, fields: RawRecord) -> Result<RawRecord, StoreError>;

    async fn patch(&self, collection: &str, patch: Patch) -> Result<RawRecord, StoreError>;

    async fn remove(&self, collection: &str, id: &str) -> Result<RawRecord, StoreError>;

    /// Apply several patches as one write. Stores without batch support
    /// return `StoreError::Unsupported` and callers fall back to single patches.
    async fn patch_batch(
        &self,
        _collection: &str,
        _patches: Vec<Patch>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        Err(StoreError::Unsupported("patch_batch"))
    }
}

/// Builder form of `RecordStore::patch`
///
/// ```rust,ignore
/// patch(&store, "faq", &id)
///     .set_field("question", question)
///     .set_field("answer", answer)
///     .run()
///     .await?;
/// ```
pub struct PatchBuilder<'s, S: RecordStore + ?Sized> {
    store: &'s S,
    collection: String,
    patch: Patch,
}

pub fn patch<'s, S: RecordStore + ?Sized>(
    store: &'s S,
    collection: &str,
    id: &str,
) -> PatchBuilder<'s, S> {
    PatchBuilder {
        store,
        collection: collection.to_string(),
        patch: Patch::new(id),
    }
}

impl<'s, S: RecordStore + ?Sized> PatchBuilder<'s, S> {
    pub fn set_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.patch = self.patch.set_field(name, value);
        self
    }

    pub async fn run(self) -> Result<RawRecord, StoreError> {
        self.store.patch(&self.collection, self.patch).await
    }
}

/// Result of loading a collection: decoded records plus the number of raw
/// records that failed to decode and were skipped.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub rejected: usize,
}

/// Decode raw records at the boundary; invalid ones are logged and skipped.
pub fn decode_all<T: CollectionRecord>(raw: &[RawRecord]) -> Loaded<T> {
    let mut items = Vec::with_capacity(raw.len());
    let mut rejected = 0;

    for record in raw {
        match T::decode(record) {
            Ok(item) => items.push(item),
            Err(e) => {
                rejected += 1;
                log_rejected(T::COLLECTION, record, &e);
            }
        }
    }

    if raw.is_empty() {
        log::warn!("No items found in {}", T::COLLECTION);
    }

    Loaded { items, rejected }
}

fn log_rejected(collection: &str, record: &RawRecord, error: &DecodeError) {
    let id = record
        .get(contracts::shared::record::ID_FIELD)
        .and_then(Value::as_str)
        .unwrap_or("<no id>");
    log::warn!("Skipping {} record {}: {}", collection, id, error);
}

/// Query and decode a whole collection
pub async fn fetch_collection<T: CollectionRecord, S: RecordStore + ?Sized>(
    store: &S,
) -> Result<Vec<T>, StoreError> {
    let raw = store.query_all(T::COLLECTION).await?;
    let loaded = decode_all::<T>(&raw);
    if loaded.rejected > 0 {
        log::warn!(
            "Loaded {} of {} {} records, {} skipped",
            loaded.items.len(),
            raw.len(),
            T::COLLECTION,
            loaded.rejected
        );
    }
    Ok(loaded.items)
}

/// Query a collection and decode the record with the given id
pub async fn fetch_one<T: CollectionRecord, S: RecordStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<T, StoreError> {
    let raw = store.query_all(T::COLLECTION).await?;
    let record = raw
        .iter()
        .find(|r| r.get(contracts::shared::record::ID_FIELD).and_then(Value::as_str) == Some(id))
        .ok_or_else(|| StoreError::NotFound {
            collection: T::COLLECTION.to_string(),
            id: id.to_string(),
        })?;
    Ok(T::decode(record)?)
}
