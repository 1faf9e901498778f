//! Граница между нетипизированными записями хранилища и типизированными агрегатами.
//!
//! Хранилище отдаёт записи как JSON-объекты. Каждый вид записи декодируется
//! ровно одной функцией `CollectionRecord::decode`; отсутствующие поля
//! отклоняются или получают значение по умолчанию здесь, а не в бизнес-логике.

use serde_json::{Map, Value};
use thiserror::Error;

/// Нетипизированная запись коллекции
pub type RawRecord = Map<String, Value>;

/// Системное поле идентификатора записи
pub const ID_FIELD: &str = "_id";

/// Ошибки декодирования записи
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Трейт для записей, хранящихся в именованной коллекции
pub trait CollectionRecord: Sized {
    /// Имя коллекции в хранилище (например, "faq")
    const COLLECTION: &'static str;

    /// Поле ручного порядка сортировки, если коллекция его поддерживает
    const ORDER_FIELD: Option<&'static str> = None;

    /// Декодировать запись хранилища в типизированное значение
    fn decode(raw: &RawRecord) -> Result<Self, DecodeError>;
}

/// Идентификатор записи (`_id`)
pub fn record_id(raw: &RawRecord) -> Result<String, DecodeError> {
    required_str(raw, ID_FIELD)
}

pub fn required_str(raw: &RawRecord, field: &'static str) -> Result<String, DecodeError> {
    match raw.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(DecodeError::MissingField(field)),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Строковое поле; отсутствие и `null` дают пустую строку
pub fn str_or_default(raw: &RawRecord, field: &'static str) -> Result<String, DecodeError> {
    Ok(optional_str(raw, field)?.unwrap_or_default())
}

pub fn optional_str(raw: &RawRecord, field: &'static str) -> Result<Option<String>, DecodeError> {
    match raw.get(field) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Целое поле. Принимает также числа с плавающей точкой без дробной части
/// (`3.0`), которые хранилище иногда отдаёт вместо целых.
pub fn optional_i64(raw: &RawRecord, field: &'static str) -> Result<Option<i64>, DecodeError> {
    match raw.get(field) {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                return Ok(Some(v));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
                _ => Err(DecodeError::WrongType {
                    field,
                    expected: "integer",
                }),
            }
        }
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "integer",
        }),
    }
}

pub fn i64_or_default(raw: &RawRecord, field: &'static str) -> Result<i64, DecodeError> {
    Ok(optional_i64(raw, field)?.unwrap_or_default())
}

pub fn f64_or_default(raw: &RawRecord, field: &'static str) -> Result<f64, DecodeError> {
    match raw.get(field) {
        Some(Value::Number(n)) => n.as_f64().ok_or(DecodeError::WrongType {
            field,
            expected: "number",
        }),
        Some(Value::Null) | None => Ok(0.0),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_record_id_required() {
        let r = raw(json!({ "question": "q" }));
        assert_eq!(record_id(&r), Err(DecodeError::MissingField("_id")));

        let r = raw(json!({ "_id": "abc" }));
        assert_eq!(record_id(&r).unwrap(), "abc");
    }

    #[test]
    fn test_integral_float_accepted() {
        let r = raw(json!({ "order": 3.0, "bad": 2.5, "text": "x" }));
        assert_eq!(optional_i64(&r, "order").unwrap(), Some(3));
        assert!(optional_i64(&r, "bad").is_err());
        assert!(optional_i64(&r, "text").is_err());
        assert_eq!(optional_i64(&r, "missing").unwrap(), None);
    }

    #[test]
    fn test_null_string_defaults_to_empty() {
        let r = raw(json!({ "header": null }));
        assert_eq!(str_or_default(&r, "header").unwrap(), "");
        assert_eq!(f64_or_default(&r, "price").unwrap(), 0.0);
    }
}
