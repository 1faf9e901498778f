use crate::shared::record::{
    optional_i64, optional_str, record_id, str_or_default, CollectionRecord, DecodeError,
    RawRecord,
};
use serde::{Deserialize, Serialize};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_PAGE: &str = "page";
pub const FIELD_SECTION: &str = "section";
pub const FIELD_HEADER: &str = "header";
pub const FIELD_SUBTYPE: &str = "subtype";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_CARD_ORDER: &str = "cardOrder";
pub const FIELD_PRIMARY_BUTTON: &str = "primaryButton";
pub const FIELD_CONTENT_TEXT_COLOUR: &str = "ContentTextColour";
pub const FIELD_IMAGE: &str = "image";
pub const FIELD_IMAGE_REF: &str = "imageRef";
pub const FIELD_IMAGE_ALT_TEXT: &str = "imageAltText";
pub const FIELD_LANGUAGE: &str = "language";

/// Подтип текстового блока
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSubtype {
    /// Основной блок секции
    Standard,
    /// Карточка внутри секции (упорядочены по `cardOrder`)
    Card,
    Other(String),
}

impl TextSubtype {
    pub fn parse(value: &str) -> Self {
        match value {
            "Standard" => TextSubtype::Standard,
            "Card" => TextSubtype::Card,
            other => TextSubtype::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TextSubtype::Standard => "Standard",
            TextSubtype::Card => "Card",
            TextSubtype::Other(s) => s,
        }
    }
}

/// Текстовый блок страницы сайта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub id: String,
    pub title: String,
    /// Страница сайта ("Home", "About me", "Pricing", "Legal")
    pub page: String,
    pub section: String,
    pub header: String,
    pub subtype: TextSubtype,
    /// Rich text (HTML)
    pub content: String,
    pub card_order: Option<i64>,
    pub primary_button: String,
    pub content_text_colour: Option<String>,
    pub image: Option<String>,
    pub image_alt_text: String,
    pub language: Option<String>,
}

impl CollectionRecord for TextItem {
    const COLLECTION: &'static str = "text";
    const ORDER_FIELD: Option<&'static str> = Some(FIELD_CARD_ORDER);

    fn decode(raw: &RawRecord) -> Result<Self, DecodeError> {
        // Старые записи хранят картинку в `imageRef`
        let image = match optional_str(raw, FIELD_IMAGE)? {
            Some(image) if !image.is_empty() => Some(image),
            _ => optional_str(raw, FIELD_IMAGE_REF)?.filter(|s| !s.is_empty()),
        };

        Ok(Self {
            id: record_id(raw)?,
            title: str_or_default(raw, FIELD_TITLE)?,
            page: str_or_default(raw, FIELD_PAGE)?,
            section: str_or_default(raw, FIELD_SECTION)?,
            header: str_or_default(raw, FIELD_HEADER)?,
            subtype: TextSubtype::parse(&str_or_default(raw, FIELD_SUBTYPE)?),
            content: str_or_default(raw, FIELD_CONTENT)?,
            card_order: optional_i64(raw, FIELD_CARD_ORDER)?,
            primary_button: str_or_default(raw, FIELD_PRIMARY_BUTTON)?,
            content_text_colour: optional_str(raw, FIELD_CONTENT_TEXT_COLOUR)?,
            image,
            image_alt_text: str_or_default(raw, FIELD_IMAGE_ALT_TEXT)?,
            language: optional_str(raw, FIELD_LANGUAGE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_image_fallback() {
        let raw = json!({
            "_id": "t1",
            "page": "Home",
            "section": "Hero",
            "subtype": "Card",
            "cardOrder": 2,
            "imageRef": "wix:image://v1/abc.png/abc.png#originWidth=10&originHeight=20",
        });
        let item = TextItem::decode(raw.as_object().unwrap()).unwrap();
        assert_eq!(item.subtype, TextSubtype::Card);
        assert_eq!(item.card_order, Some(2));
        assert!(item.image.unwrap().starts_with("wix:image://"));
        assert_eq!(item.header, "");
    }

    #[test]
    fn test_subtype_round_trip() {
        assert_eq!(TextSubtype::parse("Standard").as_str(), "Standard");
        assert_eq!(TextSubtype::parse("Banner"), TextSubtype::Other("Banner".into()));
    }
}
