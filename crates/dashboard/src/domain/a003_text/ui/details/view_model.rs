use crate::domain::a003_text::model;
use crate::shared::form::{required_param, FormError, SAVE_FAILED};
use crate::shared::modal_host::Notifier;
use crate::shared::record_store::RecordStore;
use crate::shared::text::image_dimensions;
use contracts::shared::modal::{ImageModalResult, ModalParams, ModalResult};

/// Подтверждение сохранения текста: записывает каждый параметр, кроме `id`,
/// в одноимённое поле записи.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTextConfirm {
    id: String,
    params: ModalParams,
}

impl SaveTextConfirm {
    pub fn new(params: ModalParams) -> Result<Self, FormError> {
        let id = required_param(&params, "id")?;
        Ok(Self { id, params })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Decoded field values that will be written
    pub fn fields(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .filter(|(key, _)| *key != "id")
            .map(|(key, _)| (key, self.params.decoded(key).unwrap_or_default()))
            .collect()
    }

    /// Only failures are reported here; the editor that opened the modal
    /// announces a successful save.
    pub async fn confirm(
        &self,
        store: &dyn RecordStore,
        notifier: &dyn Notifier,
    ) -> Result<ModalResult, FormError> {
        let fields = self.fields();
        if fields.is_empty() {
            log::warn!("Nothing to save for text {}", self.id);
            return Ok(ModalResult::Saved(false));
        }
        model::save_fields(store, &self.id, fields).await.map_err(|e| {
            log::error!("Failed to save text {}: {}", self.id, e);
            notifier.error(SAVE_FAILED);
            FormError::from(e)
        })?;
        Ok(ModalResult::Saved(true))
    }

    pub fn cancel(&self) -> ModalResult {
        ModalResult::Saved(false)
    }
}

/// Окно загрузки картинки. Само ничего не сохраняет: возвращает выбор
/// вызывающему редактору.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadImageForm {
    pub id: String,
    pub image: Option<String>,
    pub alt_text: String,
}

impl UploadImageForm {
    pub fn new(params: &ModalParams) -> Result<Self, FormError> {
        Ok(Self {
            id: required_param(params, "id")?,
            image: params.decoded("image").filter(|s| !s.is_empty()),
            alt_text: params.decoded("altText").unwrap_or_default(),
        })
    }

    /// Original size of the current image, for the preview
    pub fn dimensions(&self) -> (u32, u32) {
        image_dimensions(self.image.as_deref())
    }

    pub fn open_media_manager(&self) -> ModalResult {
        ModalResult::Image(ImageModalResult::OpenMediaManager {
            alt_text: Some(self.alt_text.clone()),
        })
    }

    pub fn save(&self) -> ModalResult {
        ModalResult::Image(ImageModalResult::Saved {
            saved: true,
            new_image_url: self.image.clone(),
            alt_text: Some(self.alt_text.clone()),
        })
    }

    pub fn cancel(&self) -> ModalResult {
        ModalResult::Image(ImageModalResult::Saved {
            saved: false,
            new_image_url: None,
            alt_text: None,
        })
    }
}
