//! Редактируемая копия текстового блока

use crate::shared::form::{is_blank, FIELD_REQUIRED};
use crate::shared::text::{image_dimensions, is_blank_rich_text};
use contracts::domain::a003_text::{
    TextItem, FIELD_CONTENT, FIELD_HEADER, FIELD_IMAGE_ALT_TEXT, FIELD_PRIMARY_BUTTON,
};
use contracts::shared::modal::ModalParams;

/// Editable field of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Header,
    /// Rich text
    Content,
    PrimaryButton,
    ImageAltText,
}

impl TextField {
    pub fn all() -> [TextField; 4] {
        [
            TextField::Header,
            TextField::Content,
            TextField::PrimaryButton,
            TextField::ImageAltText,
        ]
    }

    pub fn store_field(self) -> &'static str {
        match self {
            TextField::Header => FIELD_HEADER,
            TextField::Content => FIELD_CONTENT,
            TextField::PrimaryButton => FIELD_PRIMARY_BUTTON,
            TextField::ImageAltText => FIELD_IMAGE_ALT_TEXT,
        }
    }
}

/// Inline error under one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: TextField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    pub id: String,
    pub header: String,
    pub content: String,
    pub primary_button: String,
    pub image: Option<String>,
    pub image_alt_text: String,
    /// Fields that must stay non-empty for this block
    required: Vec<TextField>,
}

impl TextDraft {
    /// Header and content are always required; the button only when the
    /// block already has one.
    pub fn from_item(item: &TextItem) -> Self {
        let mut required = vec![TextField::Header, TextField::Content];
        if !is_blank(&item.primary_button) {
            required.push(TextField::PrimaryButton);
        }
        Self {
            id: item.id.clone(),
            header: item.header.clone(),
            content: item.content.clone(),
            primary_button: item.primary_button.clone(),
            image: item.image.clone(),
            image_alt_text: item.image_alt_text.clone(),
            required,
        }
    }

    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::Header => &self.header,
            TextField::Content => &self.content,
            TextField::PrimaryButton => &self.primary_button,
            TextField::ImageAltText => &self.image_alt_text,
        }
    }

    pub fn set(&mut self, field: TextField, value: &str) {
        let slot = match field {
            TextField::Header => &mut self.header,
            TextField::Content => &mut self.content,
            TextField::PrimaryButton => &mut self.primary_button,
            TextField::ImageAltText => &mut self.image_alt_text,
        };
        *slot = value.to_string();
    }

    pub fn is_required(&self, field: TextField) -> bool {
        self.required.contains(&field)
    }

    /// Rich text is stripped before the emptiness check
    pub fn validate(&self) -> Vec<FieldError> {
        self.required
            .iter()
            .filter(|&&field| match field {
                TextField::Content => is_blank_rich_text(self.get(field)),
                _ => is_blank(self.get(field)),
            })
            .map(|&field| FieldError {
                field,
                message: FIELD_REQUIRED,
            })
            .collect()
    }

    /// Differs from the stored block
    pub fn is_dirty(&self, item: &TextItem) -> bool {
        *self != TextDraft::from_item(item)
    }

    pub fn image_size(&self) -> (u32, u32) {
        image_dimensions(self.image.as_deref())
    }

    /// Parameters of the save confirmation modal: the id plus every text
    /// field under its store name, percent-encoded
    pub fn save_params(&self) -> ModalParams {
        TextField::all()
            .into_iter()
            .fold(ModalParams::new().with("id", &self.id), |params, field| {
                params.encoded(field.store_field(), self.get(field))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::record::CollectionRecord;
    use serde_json::json;

    fn item(button: &str) -> TextItem {
        let raw = json!({
            "_id": "t1",
            "page": "Home",
            "section": "Hero",
            "subtype": "Standard",
            "header": "Welcome",
            "content": "<p>Hello & welcome</p>",
            "primaryButton": button,
            "image": "wix:image://v1/a.png/a.png#originWidth=378&originHeight=358",
        });
        TextItem::decode(raw.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_validate_strips_markup() {
        let mut draft = TextDraft::from_item(&item(""));
        assert!(draft.validate().is_empty());

        draft.set(TextField::Content, "<p> </p>");
        draft.set(TextField::Header, "  ");
        let errors = draft.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.message == "Field cannot be empty"));
    }

    #[test]
    fn test_button_required_only_when_present() {
        let mut without = TextDraft::from_item(&item(""));
        without.set(TextField::PrimaryButton, "");
        assert!(without.validate().is_empty());

        let mut with = TextDraft::from_item(&item("Book now"));
        with.set(TextField::PrimaryButton, "");
        assert_eq!(with.validate()[0].field, TextField::PrimaryButton);
    }

    #[test]
    fn test_dirty_and_params() {
        let source = item("Book now");
        let mut draft = TextDraft::from_item(&source);
        assert!(!draft.is_dirty(&source));

        draft.set(TextField::Header, "Hi there");
        assert!(draft.is_dirty(&source));

        let params = draft.save_params();
        assert_eq!(params.get("id"), Some("t1"));
        assert_eq!(params.get("header"), Some("Hi%20there"));
        assert_eq!(params.decoded("content").as_deref(), Some("<p>Hello & welcome</p>"));
        assert_eq!(params.decoded("primaryButton").as_deref(), Some("Book now"));
        assert_eq!(draft.image_size(), (378, 358));
    }
}
