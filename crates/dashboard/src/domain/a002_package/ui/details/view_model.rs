use super::model;
use crate::shared::form::{
    is_blank, report, required_param, FormError, CHANGES_SAVED, FIELD_REQUIRED, SAVE_FAILED,
};
use crate::shared::modal_host::Notifier;
use crate::shared::record_store::RecordStore;
use crate::shared::text::is_blank_rich_text;
use contracts::domain::a002_package::PackageItem;
use contracts::shared::modal::{ModalParams, ModalResult};

/// Форма цены пакета. Название и итоговая цена пересчитываются при
/// изменении типа, количества занятий или цены занятия.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPricingForm {
    item: PackageItem,
    pub error: Option<String>,
}

impl EditPricingForm {
    pub async fn load(store: &dyn RecordStore, params: &ModalParams) -> Result<Self, FormError> {
        let id = required_param(params, "id")?;
        let item = model::fetch_package(store, &id).await?;
        Ok(Self { item, error: None })
    }

    pub fn item(&self) -> &PackageItem {
        &self.item
    }

    pub fn set_type(&mut self, package_type: &str) {
        self.item.package_type = package_type.to_string();
        self.recalculate();
    }

    pub fn set_session_qty(&mut self, qty: i64) {
        self.item.session_qty = qty;
        self.recalculate();
    }

    pub fn set_session_price(&mut self, price: f64) {
        self.item.session_price = price;
        self.recalculate();
    }

    pub fn set_validity_months(&mut self, months: i64) {
        self.item.validity_months = months;
    }

    fn recalculate(&mut self) {
        self.item.name = PackageItem::display_name(&self.item.package_type, self.item.session_qty);
        self.item.total_price = PackageItem::total_for(self.item.session_qty, self.item.session_price);
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.item.package_type) {
            return Err(FormError::validation(FIELD_REQUIRED));
        }
        if self.item.session_qty <= 0 {
            return Err(FormError::validation("Number of sessions must be positive"));
        }
        if !self.item.session_price.is_finite() || self.item.session_price < 0.0 {
            return Err(FormError::validation("Session price must not be negative"));
        }
        Ok(())
    }

    pub async fn submit(
        &mut self,
        store: &dyn RecordStore,
        notifier: &dyn Notifier,
    ) -> Result<ModalResult, FormError> {
        self.error = None;
        let result = match self.validate() {
            Ok(()) => model::save_pricing(store, &self.item)
                .await
                .map(|_| ModalResult::Saved(true))
                .map_err(FormError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::error!("Failed to save pricing of {}: {}", self.item.id, e);
            self.error = Some(e.to_string());
        }
        report(notifier, &result, CHANGES_SAVED, SAVE_FAILED);
        result
    }
}

/// Форма описания пакета (заголовок и текст карточки)
#[derive(Debug, Clone, PartialEq)]
pub struct EditDescriptionForm {
    pub id: String,
    pub header: String,
    pub content: String,
    pub error: Option<String>,
}

impl EditDescriptionForm {
    pub async fn load(store: &dyn RecordStore, params: &ModalParams) -> Result<Self, FormError> {
        let id = required_param(params, "id")?;
        let text = model::fetch_text(store, &id).await?;
        Ok(Self {
            id: text.id,
            header: text.header,
            content: text.content,
            error: None,
        })
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if is_blank(&self.header) || is_blank_rich_text(&self.content) {
            return Err(FormError::validation(FIELD_REQUIRED));
        }
        Ok(())
    }

    pub async fn submit(
        &mut self,
        store: &dyn RecordStore,
        notifier: &dyn Notifier,
    ) -> Result<ModalResult, FormError> {
        self.error = None;
        let result = match self.validate() {
            Ok(()) => model::save_description(store, &self.id, &self.header, &self.content)
                .await
                .map(|_| ModalResult::Saved(true))
                .map_err(FormError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::error!("Failed to save description {}: {}", self.id, e);
            self.error = Some(e.to_string());
        }
        report(notifier, &result, CHANGES_SAVED, SAVE_FAILED);
        result
    }
}
