use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::adapter::serializer::appointment_serializer::{
    self, to_appointment_response, AppointmentResponse,
};
use crate::adapter::serializer::UpdateMode;

use super::error::{ApiError, ErrorResponse};
use super::{parse_id, AppState};

// --- Handlers ---

/// 予約一覧を予約日時の昇順で返す。
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "予約一覧", body = Vec<AppointmentResponse>)
    ),
    tag = "appointments"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let records = state.list_appointments_uc.execute().await?;
    Ok(Json(records.iter().map(to_appointment_response).collect()))
}

/// 予約を登録する。pet_id は実在するペットを指していなければならない。
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "登録した予約", body = AppointmentResponse),
        (status = 400, description = "検証エラー", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ApiError> {
    let input = appointment_serializer::parse_create(&payload).map_err(ApiError::Validation)?;
    let record = state.create_appointment_uc.execute(input).await?;
    Ok((StatusCode::CREATED, Json(to_appointment_response(&record))))
}

/// 予約を 1 件取得する。
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(
        ("id" = String, Path, description = "予約 ID (UUID)")
    ),
    responses(
        (status = 200, description = "予約", body = AppointmentResponse),
        (status = 404, description = "予約が存在しない", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.get_appointment_uc.execute(id).await?;
    Ok(Json(to_appointment_response(&record)))
}

/// 予約を全体更新する。
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(
        ("id" = String, Path, description = "予約 ID (UUID)")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "更新後の予約", body = AppointmentResponse),
        (status = 400, description = "検証エラー", body = ErrorResponse),
        (status = 404, description = "予約が存在しない", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn put_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    update_appointment(state, &id, &payload, UpdateMode::Full).await
}

/// 予約を部分更新する。
#[utoipa::path(
    patch,
    path = "/api/appointments/{id}",
    params(
        ("id" = String, Path, description = "予約 ID (UUID)")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "更新後の予約", body = AppointmentResponse),
        (status = 400, description = "検証エラー", body = ErrorResponse),
        (status = 404, description = "予約が存在しない", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn patch_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    update_appointment(state, &id, &payload, UpdateMode::Partial).await
}

async fn update_appointment(
    state: AppState,
    id: &str,
    payload: &serde_json::Value,
    mode: UpdateMode,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let id = parse_id(id)?;
    let input = appointment_serializer::parse_update(payload, mode).map_err(ApiError::Validation)?;
    let record = state.update_appointment_uc.execute(id, input).await?;
    Ok(Json(to_appointment_response(&record)))
}

/// 予約を削除する。
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(
        ("id" = String, Path, description = "予約 ID (UUID)")
    ),
    responses(
        (status = 204, description = "削除完了"),
        (status = 404, description = "予約が存在しない", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.delete_appointment_uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
