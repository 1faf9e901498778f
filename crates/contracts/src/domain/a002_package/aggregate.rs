use crate::shared::record::{
    f64_or_default, i64_or_default, optional_str, record_id, str_or_default, CollectionRecord,
    DecodeError, RawRecord,
};
use serde::{Deserialize, Serialize};

pub const FIELD_PACKAGE_TYPE: &str = "packageType";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_TOTAL_PRICE: &str = "totalPrice";
pub const FIELD_SESSION_PRICE: &str = "sessionPrice";
pub const FIELD_SESSIONS_QTY: &str = "sessionsQty";
pub const FIELD_VALIDITY_MONTHS: &str = "validityMonths";
pub const FIELD_DESCRIPTION: &str = "description";

/// Пакет тренировок (строка прайса)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    pub id: String,
    /// Тип пакета, например "Standard 60"
    pub package_type: String,
    pub name: String,
    pub total_price: f64,
    pub session_price: f64,
    pub session_qty: i64,
    pub validity_months: i64,
    pub description: Option<String>,
}

impl PackageItem {
    /// Название пакета: "{тип} - {количество} Sessions"
    pub fn display_name(package_type: &str, session_qty: i64) -> String {
        format!("{} - {} Sessions", package_type, session_qty)
    }

    /// Итоговая цена пакета
    pub fn total_for(session_qty: i64, session_price: f64) -> f64 {
        session_qty as f64 * session_price
    }
}

impl CollectionRecord for PackageItem {
    const COLLECTION: &'static str = "packages";

    fn decode(raw: &RawRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: record_id(raw)?,
            package_type: str_or_default(raw, FIELD_PACKAGE_TYPE)?,
            name: str_or_default(raw, FIELD_TITLE)?,
            total_price: f64_or_default(raw, FIELD_TOTAL_PRICE)?,
            session_price: f64_or_default(raw, FIELD_SESSION_PRICE)?,
            session_qty: i64_or_default(raw, FIELD_SESSIONS_QTY)?,
            validity_months: i64_or_default(raw, FIELD_VALIDITY_MONTHS)?,
            description: optional_str(raw, FIELD_DESCRIPTION)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_package() {
        let raw = json!({
            "_id": "p1",
            "packageType": "Quick 40",
            "title": "Quick 40 - 5 Sessions",
            "totalPrice": 250,
            "sessionPrice": 50.0,
            "sessionsQty": 5,
            "validityMonths": 3,
        });
        let item = PackageItem::decode(raw.as_object().unwrap()).unwrap();
        assert_eq!(item.package_type, "Quick 40");
        assert_eq!(item.total_price, 250.0);
        assert_eq!(item.session_qty, 5);
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_derived_fields() {
        assert_eq!(
            PackageItem::display_name("Extended 75", 10),
            "Extended 75 - 10 Sessions"
        );
        assert_eq!(PackageItem::total_for(10, 65.5), 655.0);
    }
}
