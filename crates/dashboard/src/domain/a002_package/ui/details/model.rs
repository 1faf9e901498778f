use crate::shared::record_store::{fetch_one, patch, RecordStore, StoreError};
use contracts::domain::a002_package::{
    PackageItem, FIELD_PACKAGE_TYPE, FIELD_SESSIONS_QTY, FIELD_SESSION_PRICE, FIELD_TITLE,
    FIELD_TOTAL_PRICE, FIELD_VALIDITY_MONTHS,
};
use contracts::domain::a003_text::{TextItem, FIELD_CONTENT, FIELD_HEADER};
use contracts::shared::record::CollectionRecord;

pub async fn fetch_package(store: &dyn RecordStore, id: &str) -> Result<PackageItem, StoreError> {
    fetch_one(store, id).await
}

pub async fn save_pricing(store: &dyn RecordStore, item: &PackageItem) -> Result<(), StoreError> {
    patch(store, PackageItem::COLLECTION, &item.id)
        .set_field(FIELD_PACKAGE_TYPE, item.package_type.as_str())
        .set_field(FIELD_TITLE, item.name.as_str())
        .set_field(FIELD_SESSIONS_QTY, item.session_qty)
        .set_field(FIELD_SESSION_PRICE, item.session_price)
        .set_field(FIELD_TOTAL_PRICE, item.total_price)
        .set_field(FIELD_VALIDITY_MONTHS, item.validity_months)
        .run()
        .await?;
    Ok(())
}

pub async fn fetch_text(store: &dyn RecordStore, id: &str) -> Result<TextItem, StoreError> {
    fetch_one(store, id).await
}

pub async fn save_description(
    store: &dyn RecordStore,
    id: &str,
    header: &str,
    content: &str,
) -> Result<(), StoreError> {
    patch(store, TextItem::COLLECTION, id)
        .set_field(FIELD_HEADER, header)
        .set_field(FIELD_CONTENT, content)
        .run()
        .await?;
    Ok(())
}
