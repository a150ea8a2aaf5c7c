pub mod appointment_serializer;
pub mod pet_serializer;

pub use appointment_serializer::AppointmentResponse;
pub use pet_serializer::PetResponse;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::entity::AppointmentStatus;

/// FieldErrors はフィールド名から検証エラーメッセージ群へのマップ。
/// 400 レスポンスの details ペイロードにそのまま載る。
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// UpdateMode は更新ペイロードの検証モード。
/// Full (PUT) は必須フィールドの欠落を拒否し、Partial (PATCH) は任意の部分集合を許す。
/// どちらもペイロードに現れたフィールドだけを適用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

pub(crate) fn add_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

/// ペイロードが JSON オブジェクトであることを確認する。
pub(crate) fn ensure_object(payload: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    payload.as_object().ok_or_else(|| {
        let mut errors = FieldErrors::new();
        add_error(&mut errors, "non_field_errors", "expected a JSON object");
        errors
    })
}

/// id と created_at は生成時に確定する。ペイロードに現れたら拒否する。
pub(crate) fn reject_immutable_fields(map: &Map<String, Value>, errors: &mut FieldErrors) {
    for field in ["id", "created_at"] {
        if map.contains_key(field) {
            add_error(errors, field, "this field is immutable");
        }
    }
}

/// 指定フィールドが欠落していたら必須エラーを積む。
pub(crate) fn require(map: &Map<String, Value>, fields: &[&str], errors: &mut FieldErrors) {
    for field in fields {
        if !map.contains_key(*field) {
            add_error(errors, field, "this field is required");
        }
    }
}

// 以降の *_field ヘルパーは、フィールドが存在して型が正しい場合のみ Some を返す。
// 型違反はエラーに積み、欠落は黙って None を返す (必須チェックは require が担う)。

pub(crate) fn string_field(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = map.get(field)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            add_error(errors, field, "must be a string");
            None
        }
    }
}

pub(crate) fn int_field(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<i32> {
    let value = map.get(field)?;
    match value.as_i64().and_then(|v| i32::try_from(v).ok()) {
        Some(v) => Some(v),
        None => {
            add_error(errors, field, "must be an integer");
            None
        }
    }
}

pub(crate) fn timestamp_field(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    let value = map.get(field)?;
    let parsed = value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    match parsed {
        Some(dt) => Some(dt),
        None => {
            add_error(errors, field, "must be an RFC 3339 timestamp");
            None
        }
    }
}

pub(crate) fn uuid_field(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Uuid> {
    let value = map.get(field)?;
    match value.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
        Some(id) => Some(id),
        None => {
            add_error(errors, field, "must be a valid UUID");
            None
        }
    }
}

pub(crate) fn status_field(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<AppointmentStatus> {
    let value = map.get(field)?;
    let Some(s) = value.as_str() else {
        add_error(errors, field, "must be a string");
        return None;
    };
    match AppointmentStatus::from_str_value(s) {
        Ok(status) => Some(status),
        Err(_) => {
            add_error(errors, field, &format!("\"{}\" is not a valid choice", s));
            None
        }
    }
}
