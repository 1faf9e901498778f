use crate::enums::Language;
use crate::shared::record::{
    optional_i64, optional_str, record_id, str_or_default, CollectionRecord, DecodeError,
    RawRecord,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Store field names
// ============================================================================
pub const FIELD_QUESTION: &str = "question";
pub const FIELD_ANSWER: &str = "answer";
pub const FIELD_TOPIC: &str = "topic";
pub const FIELD_ORDER: &str = "order";
pub const FIELD_LANGUAGE: &str = "language";
pub const FIELD_TITLE: &str = "title";

/// Вопрос FAQ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: String,
    pub question: String,
    /// Ответ в формате rich text (HTML)
    pub answer: String,
    pub topic: String,
    /// Ручной порядок внутри языка
    pub order: Option<i64>,
    pub language: Option<String>,
    pub title: Option<String>,
}

impl FaqItem {
    /// Служебный заголовок записи: "{order}-{код языка}", например "3-en"
    pub fn title_for(order: i64, language: &str) -> String {
        format!("{}-{}", order, Language::code_for(language))
    }
}

impl CollectionRecord for FaqItem {
    const COLLECTION: &'static str = "faq";
    const ORDER_FIELD: Option<&'static str> = Some(FIELD_ORDER);

    fn decode(raw: &RawRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: record_id(raw)?,
            question: str_or_default(raw, FIELD_QUESTION)?,
            answer: str_or_default(raw, FIELD_ANSWER)?,
            topic: str_or_default(raw, FIELD_TOPIC)?,
            order: optional_i64(raw, FIELD_ORDER)?,
            language: optional_str(raw, FIELD_LANGUAGE)?,
            title: optional_str(raw, FIELD_TITLE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_faq() {
        let raw = json!({
            "_id": "f1",
            "question": "How do I book?",
            "answer": "<p>Online</p>",
            "topic": "Admin",
            "order": 2,
            "language": "English",
        });
        let item = FaqItem::decode(raw.as_object().unwrap()).unwrap();
        assert_eq!(item.id, "f1");
        assert_eq!(item.order, Some(2));
        assert_eq!(item.title, None);
    }

    #[test]
    fn test_title_for() {
        assert_eq!(FaqItem::title_for(4, "German"), "4-de");
    }
}
