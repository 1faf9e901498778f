use crate::shared::record_store::{fetch_collection, fetch_one, Patch, RecordStore, StoreError};
use contracts::domain::a001_faq::{
    FaqItem, FIELD_ANSWER, FIELD_LANGUAGE, FIELD_ORDER, FIELD_QUESTION, FIELD_TITLE, FIELD_TOPIC,
};
use contracts::shared::record::{CollectionRecord, RawRecord};
use serde_json::Value;

pub async fn fetch_by_id(store: &dyn RecordStore, id: &str) -> Result<FaqItem, StoreError> {
    fetch_one(store, id).await
}

/// Next free order value within one language (1 for an empty language)
pub async fn next_order(store: &dyn RecordStore, language: &str) -> Result<i64, StoreError> {
    let items: Vec<FaqItem> = fetch_collection(store).await?;
    let max = items
        .iter()
        .filter(|i| i.language.as_deref() == Some(language))
        .filter_map(|i| i.order)
        .max()
        .unwrap_or(0);
    Ok(max + 1)
}

pub struct FaqFields<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub topic: &'a str,
    pub language: &'a str,
    pub title: &'a str,
}

impl FaqFields<'_> {
    fn into_record(self) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert(FIELD_QUESTION.into(), Value::from(self.question));
        record.insert(FIELD_ANSWER.into(), Value::from(self.answer));
        record.insert(FIELD_TOPIC.into(), Value::from(self.topic));
        record.insert(FIELD_LANGUAGE.into(), Value::from(self.language));
        record.insert(FIELD_TITLE.into(), Value::from(self.title));
        record
    }
}

pub async fn insert(
    store: &dyn RecordStore,
    fields: FaqFields<'_>,
    order: i64,
) -> Result<FaqItem, StoreError> {
    let mut record = fields.into_record();
    record.insert(FIELD_ORDER.into(), Value::from(order));
    let saved = store.insert(FaqItem::COLLECTION, record).await?;
    Ok(FaqItem::decode(&saved)?)
}

/// Patch the editable fields; `order` is written only when the record moves
/// to another language.
pub async fn update(
    store: &dyn RecordStore,
    id: &str,
    fields: FaqFields<'_>,
    order: Option<i64>,
) -> Result<FaqItem, StoreError> {
    let mut patch = Patch::new(id);
    for (name, value) in fields.into_record() {
        patch = patch.set_field(&name, value);
    }
    if let Some(order) = order {
        patch = patch.set_field(FIELD_ORDER, order);
    }
    let saved = store.patch(FaqItem::COLLECTION, patch).await?;
    Ok(FaqItem::decode(&saved)?)
}

pub async fn remove(store: &dyn RecordStore, id: &str) -> Result<(), StoreError> {
    store.remove(FaqItem::COLLECTION, id).await?;
    Ok(())
}
