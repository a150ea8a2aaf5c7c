use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::entity::{AppointmentRecord, AppointmentStatus};
use crate::usecase::{CreateAppointmentInput, UpdateAppointmentInput};

use super::{
    ensure_object, reject_immutable_fields, require, status_field, string_field, timestamp_field,
    uuid_field, FieldErrors, UpdateMode,
};

/// AppointmentResponse は予約の API 表現。pet_name は読み取り時に解決する派生フィールドで、
/// 参照先ペットが存在しない場合は null になる。
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: String,
    pub pet_id: String,
    pub pet_name: Option<String>,
    pub appointment_date: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: String,
    pub created_at: String,
}

pub fn to_appointment_response(record: &AppointmentRecord) -> AppointmentResponse {
    AppointmentResponse {
        id: record.appointment.id.to_string(),
        pet_id: record.appointment.pet_id.to_string(),
        pet_name: record.pet_name.clone(),
        appointment_date: record.appointment.appointment_date.to_rfc3339(),
        reason: record.appointment.reason.clone(),
        status: record.appointment.status,
        notes: record.appointment.notes.clone(),
        created_at: record.appointment.created_at.to_rfc3339(),
    }
}

/// 登録ペイロードを検証して入力に変換する。
/// status は省略時 scheduled、notes は省略時空文字に落ちる。
pub fn parse_create(payload: &Value) -> Result<CreateAppointmentInput, FieldErrors> {
    let map = ensure_object(payload)?;
    let mut errors = FieldErrors::new();

    reject_immutable_fields(map, &mut errors);
    require(map, &["pet_id", "appointment_date", "reason"], &mut errors);

    let pet_id = uuid_field(map, "pet_id", &mut errors);
    let appointment_date = timestamp_field(map, "appointment_date", &mut errors);
    let reason = string_field(map, "reason", &mut errors);
    let status = status_field(map, "status", &mut errors);
    let notes = string_field(map, "notes", &mut errors);

    match (pet_id, appointment_date, reason) {
        (Some(pet_id), Some(appointment_date), Some(reason)) if errors.is_empty() => {
            Ok(CreateAppointmentInput {
                pet_id,
                appointment_date,
                reason,
                status: status.unwrap_or(AppointmentStatus::Scheduled),
                notes: notes.unwrap_or_default(),
            })
        }
        _ => Err(errors),
    }
}

/// 更新ペイロードを検証する。pet_name は派生フィールドなので未知フィールド扱いで無視される。
pub fn parse_update(
    payload: &Value,
    mode: UpdateMode,
) -> Result<UpdateAppointmentInput, FieldErrors> {
    let map = ensure_object(payload)?;
    let mut errors = FieldErrors::new();

    reject_immutable_fields(map, &mut errors);
    if mode == UpdateMode::Full {
        require(map, &["pet_id", "appointment_date", "reason"], &mut errors);
    }

    let input = UpdateAppointmentInput {
        pet_id: uuid_field(map, "pet_id", &mut errors),
        appointment_date: timestamp_field(map, "appointment_date", &mut errors),
        reason: string_field(map, "reason", &mut errors),
        status: status_field(map, "status", &mut errors),
        notes: string_field(map, "notes", &mut errors),
    };

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}
