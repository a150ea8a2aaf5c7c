use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::adapter::serializer::pet_serializer::{self, to_pet_response, PetResponse};
use crate::adapter::serializer::UpdateMode;
use crate::usecase::UpdatePetInput;

use super::error::{ApiError, ErrorResponse};
use super::{parse_id, AppState};

// --- Handlers ---

/// ペット一覧を登録日時の降順で返す。
#[utoipa::path(
    get,
    path = "/api/pets",
    responses(
        (status = 200, description = "ペット一覧", body = Vec<PetResponse>)
    ),
    tag = "pets"
)]
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<PetResponse>>, ApiError> {
    let pets = state.list_pets_uc.execute().await?;
    Ok(Json(pets.iter().map(to_pet_response).collect()))
}

/// ペットを登録する。
#[utoipa::path(
    post,
    path = "/api/pets",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "登録したペット", body = PetResponse),
        (status = 400, description = "検証エラー", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn create_pet(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<PetResponse>), ApiError> {
    let input = pet_serializer::parse_create(&payload).map_err(ApiError::Validation)?;
    let pet = state.create_pet_uc.execute(input).await?;
    Ok((StatusCode::CREATED, Json(to_pet_response(&pet))))
}

/// ペットを 1 件取得する。
#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    params(
        ("id" = String, Path, description = "ペット ID (UUID)")
    ),
    responses(
        (status = 200, description = "ペット", body = PetResponse),
        (status = 404, description = "ペットが存在しない", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PetResponse>, ApiError> {
    let id = parse_id(&id)?;
    let pet = state.get_pet_uc.execute(id).await?;
    Ok(Json(to_pet_response(&pet)))
}

/// ペットを全体更新する。必須フィールドの欠落は検証エラーになる。
#[utoipa::path(
    put,
    path = "/api/pets/{id}",
    params(
        ("id" = String, Path, description = "ペット ID (UUID)")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "更新後のペット", body = PetResponse),
        (status = 400, description = "検証エラー", body = ErrorResponse),
        (status = 404, description = "ペットが存在しない", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn put_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<PetResponse>, ApiError> {
    update_pet(state, &id, &payload, UpdateMode::Full).await
}

/// ペットを部分更新する。ペイロードに現れたフィールドだけを適用する。
#[utoipa::path(
    patch,
    path = "/api/pets/{id}",
    params(
        ("id" = String, Path, description = "ペット ID (UUID)")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "更新後のペット", body = PetResponse),
        (status = 400, description = "検証エラー", body = ErrorResponse),
        (status = 404, description = "ペットが存在しない", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn patch_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<PetResponse>, ApiError> {
    update_pet(state, &id, &payload, UpdateMode::Partial).await
}

async fn update_pet(
    state: AppState,
    id: &str,
    payload: &serde_json::Value,
    mode: UpdateMode,
) -> Result<Json<PetResponse>, ApiError> {
    let id = parse_id(id)?;
    let input: UpdatePetInput =
        pet_serializer::parse_update(payload, mode).map_err(ApiError::Validation)?;
    let pet = state.update_pet_uc.execute(id, input).await?;
    Ok(Json(to_pet_response(&pet)))
}

/// ペットを削除する。従属する予約も同一トランザクションで削除される。
#[utoipa::path(
    delete,
    path = "/api/pets/{id}",
    params(
        ("id" = String, Path, description = "ペット ID (UUID)")
    ),
    responses(
        (status = 204, description = "削除完了"),
        (status = 404, description = "ペットが存在しない", body = ErrorResponse)
    ),
    tag = "pets"
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.delete_pet_uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
