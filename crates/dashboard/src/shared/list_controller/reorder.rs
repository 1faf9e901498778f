//! Swap of two adjacent order keys
//!
//! One batch write when the store supports it. Otherwise two single patches;
//! if the second fails the first one is reverted.

use super::ListError;
use crate::shared::record_store::{Patch, RecordStore, StoreError};
use contracts::shared::record::RawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub(crate) fn offset(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// One side of the swap: record id and its current order key
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    pub id: String,
    pub key: i64,
}

/// Exchange the order keys of `a` and `b`; returns the updated records
pub(crate) async fn swap_order_keys(
    store: &dyn RecordStore,
    collection: &str,
    field: &str,
    a: &Slot,
    b: &Slot,
) -> Result<Vec<RawRecord>, ListError> {
    let patches = vec![
        Patch::new(&a.id).set_field(field, b.key),
        Patch::new(&b.id).set_field(field, a.key),
    ];

    match store.patch_batch(collection, patches.clone()).await {
        Ok(records) => Ok(records),
        Err(StoreError::Unsupported(_)) => {
            log::debug!("Store has no batch writes, swapping {} one by one", collection);
            swap_sequential(store, collection, field, a, patches).await
        }
        Err(e) => Err(ListError::Store(e)),
    }
}

async fn swap_sequential(
    store: &dyn RecordStore,
    collection: &str,
    field: &str,
    a: &Slot,
    patches: Vec<Patch>,
) -> Result<Vec<RawRecord>, ListError> {
    let mut patches = patches.into_iter();
    let (Some(first), Some(second)) = (patches.next(), patches.next()) else {
        return Ok(Vec::new());
    };

    let first = store.patch(collection, first).await?;
    match store.patch(collection, second).await {
        Ok(second) => Ok(vec![first, second]),
        Err(failed) => {
            log::warn!(
                "Second patch of {} swap failed ({}), reverting {}",
                collection,
                failed,
                a.id
            );
            let revert = Patch::new(&a.id).set_field(field, a.key);
            match store.patch(collection, revert).await {
                Ok(_) => Err(ListError::RolledBack(failed)),
                Err(rollback) => Err(ListError::RollbackFailed { failed, rollback }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_store::memory::StoreOp;
    use crate::shared::record_store::MemoryRecordStore;
    use serde_json::json;

    fn store(batch: bool) -> MemoryRecordStore {
        let store = if batch {
            MemoryRecordStore::new()
        } else {
            MemoryRecordStore::without_batch()
        };
        store.seed(
            "faq",
            vec![
                json!({ "_id": "a", "order": 1 }),
                json!({ "_id": "b", "order": 2 }),
            ],
        );
        store
    }

    fn slots() -> (Slot, Slot) {
        (
            Slot { id: "a".into(), key: 1 },
            Slot { id: "b".into(), key: 2 },
        )
    }

    fn order_of(store: &MemoryRecordStore, id: &str) -> i64 {
        store.record("faq", id).unwrap()["order"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_swap_uses_single_batch() {
        let store = store(true);
        let (a, b) = slots();

        let updated = swap_order_keys(&store, "faq", "order", &a, &b).await.unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(order_of(&store, "a"), 2);
        assert_eq!(order_of(&store, "b"), 1);
        assert_eq!(
            store.writes(),
            vec![StoreOp::Batch {
                collection: "faq".into(),
                ids: vec!["a".into(), "b".into()],
            }]
        );
    }

    #[tokio::test]
    async fn test_swap_falls_back_to_sequential_patches() {
        let store = store(false);
        let (a, b) = slots();

        swap_order_keys(&store, "faq", "order", &a, &b).await.unwrap();

        assert_eq!(store.patch_calls(), 2);
        assert_eq!(order_of(&store, "a"), 2);
        assert_eq!(order_of(&store, "b"), 1);
    }

    #[tokio::test]
    async fn test_failed_second_patch_is_reverted() {
        let store = store(false);
        store.fail_patch_call(2);
        let (a, b) = slots();

        let err = swap_order_keys(&store, "faq", "order", &a, &b)
            .await
            .unwrap_err();

        assert!(matches!(err, ListError::RolledBack(_)));
        assert_eq!(store.patch_calls(), 3);
        assert_eq!(order_of(&store, "a"), 1);
        assert_eq!(order_of(&store, "b"), 2);
    }

    #[tokio::test]
    async fn test_failed_revert_is_reported() {
        let store = store(false);
        store.fail_patch_call(2);
        store.fail_patch_call(3);
        let (a, b) = slots();

        let err = swap_order_keys(&store, "faq", "order", &a, &b)
            .await
            .unwrap_err();

        assert!(matches!(err, ListError::RollbackFailed { .. }));
        assert_eq!(order_of(&store, "a"), 2);
    }

    #[tokio::test]
    async fn test_failed_batch_changes_nothing() {
        let store = store(true);
        store.fail_patch_for("b");
        let (a, b) = slots();

        let err = swap_order_keys(&store, "faq", "order", &a, &b)
            .await
            .unwrap_err();

        assert!(matches!(err, ListError::Store(StoreError::Transport(_))));
        assert_eq!(order_of(&store, "a"), 1);
        assert_eq!(order_of(&store, "b"), 2);
    }
}
