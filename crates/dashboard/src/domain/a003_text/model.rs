//! Store access shared by the text editors and the text modals

use crate::shared::record_store::{fetch_collection, Patch, RecordStore, StoreError};
use contracts::domain::a003_text::{TextItem, FIELD_IMAGE, FIELD_IMAGE_ALT_TEXT};
use contracts::shared::record::CollectionRecord;
use serde_json::Value;

/// Text blocks of one site page, in load order
pub async fn fetch_page(store: &dyn RecordStore, page: &str) -> Result<Vec<TextItem>, StoreError> {
    let texts: Vec<TextItem> = fetch_collection(store).await?;
    Ok(texts.into_iter().filter(|t| t.page == page).collect())
}

/// Set several string fields of one text block in a single patch
pub async fn save_fields<'a>(
    store: &dyn RecordStore,
    id: &str,
    fields: impl IntoIterator<Item = (&'a str, String)>,
) -> Result<TextItem, StoreError> {
    let mut patch = Patch::new(id);
    for (name, value) in fields {
        patch = patch.set_field(name, Value::String(value));
    }
    let saved = store.patch(TextItem::COLLECTION, patch).await?;
    Ok(TextItem::decode(&saved)?)
}

/// The image is always written to `image`, legacy `imageRef` is only read
pub async fn save_image(
    store: &dyn RecordStore,
    id: &str,
    image: &str,
    alt_text: &str,
) -> Result<TextItem, StoreError> {
    save_fields(
        store,
        id,
        [
            (FIELD_IMAGE, image.to_string()),
            (FIELD_IMAGE_ALT_TEXT, alt_text.to_string()),
        ],
    )
    .await
}
