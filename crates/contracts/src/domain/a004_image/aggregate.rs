use crate::shared::record::{record_id, str_or_default, CollectionRecord, DecodeError, RawRecord};
use serde::{Deserialize, Serialize};

pub const FIELD_IMAGE: &str = "image";

/// Картинка из медиатеки сайта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub id: String,
    pub image: String,
}

impl CollectionRecord for ImageItem {
    const COLLECTION: &'static str = "images";

    fn decode(raw: &RawRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: record_id(raw)?,
            image: str_or_default(raw, FIELD_IMAGE)?,
        })
    }
}
