//! Контракты модальных окон: какие окна открывает дашборд, с какими
//! параметрами и какой типизированный результат они возвращают.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Модальные окна дашборда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalKind {
    AddFaq,
    EditFaq,
    DeleteFaq,
    EditPricing,
    EditDescription,
    SaveText,
    UploadImage,
}

impl ModalKind {
    pub fn all() -> Vec<ModalKind> {
        vec![
            ModalKind::AddFaq,
            ModalKind::EditFaq,
            ModalKind::DeleteFaq,
            ModalKind::EditPricing,
            ModalKind::EditDescription,
            ModalKind::SaveText,
            ModalKind::UploadImage,
        ]
    }

    /// Ключ окна в конфигурации (`[modals]`)
    pub fn config_key(&self) -> &'static str {
        match self {
            ModalKind::AddFaq => "add_faq",
            ModalKind::EditFaq => "edit_faq",
            ModalKind::DeleteFaq => "delete_faq",
            ModalKind::EditPricing => "edit_pricing",
            ModalKind::EditDescription => "edit_description",
            ModalKind::SaveText => "save_text",
            ModalKind::UploadImage => "upload_image",
        }
    }
}

/// Параметры открытия окна.
///
/// Текстовые значения, которые могут содержать разметку, передаются
/// percent-encoded (`encoded`) и читаются через `decoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalParams(BTreeMap<String, String>);

impl ModalParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn encoded(self, key: &str, value: &str) -> Self {
        let value = urlencoding::encode(value).into_owned();
        self.with(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Значение, закодированное через `encoded`. Некорректная кодировка
    /// возвращается как есть.
    pub fn decoded(&self, key: &str) -> Option<String> {
        self.get(key).map(|raw| match urlencoding::decode(raw) {
            Ok(value) => value.into_owned(),
            Err(_) => raw.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Результат окна загрузки картинки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageModalResult {
    /// Пользователь хочет выбрать картинку в медиатеке; окно будет открыто снова
    OpenMediaManager { alt_text: Option<String> },
    Saved {
        saved: bool,
        new_image_url: Option<String>,
        alt_text: Option<String>,
    },
}

/// Типизированный результат закрытия окна
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModalResult {
    Saved(bool),
    Deleted(bool),
    Image(ImageModalResult),
    /// Окно закрыто без результата (Escape, клик по подложке)
    Dismissed,
}

impl ModalResult {
    /// Окно сообщило об успешном изменении данных в хранилище.
    /// Окно картинки само ничего не сохраняет, изменение применяет вызывающий.
    pub fn is_mutation(&self) -> bool {
        matches!(self, ModalResult::Saved(true) | ModalResult::Deleted(true))
    }
}
