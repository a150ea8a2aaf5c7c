use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::infrastructure::config::RootView;

use super::error::ApiError;
use super::AppState;

fn api_info_payload() -> serde_json::Value {
    serde_json::json!({
        "message": "Welcome to PetClinic! 🐾",
        "description": "A modern pet management system",
        "features": [
            "Pet registration and management",
            "Appointment scheduling",
            "Owner information tracking",
            "RESTful API endpoints",
        ],
        "endpoints": {
            "pets": "/api/pets",
            "appointments": "/api/appointments",
        },
    })
}

// --- Handlers ---

/// トップページ。server.root_view の設定に応じて JSON ウェルカムペイロードか
/// HTML ランディングページを返す。
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "ウェルカムペイロードまたは HTML ページ")
    ),
    tag = "info"
)]
pub async fn home(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.root_view {
        RootView::Json => Ok(Json(api_info_payload()).into_response()),
        RootView::Html => {
            let page = state
                .templates
                .render_index()
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Ok(Html(page).into_response())
        }
    }
}

/// サービス概要。root_view の設定にかかわらず常に JSON を返す。
#[utoipa::path(
    get,
    path = "/api-info",
    responses(
        (status = 200, description = "サービス概要")
    ),
    tag = "info"
)]
pub async fn api_info() -> Json<serde_json::Value> {
    Json(api_info_payload())
}

/// API ルート。コレクションの場所を列挙する。
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "コレクション一覧")
    ),
    tag = "info"
)]
pub async fn api_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "pets": "/api/pets",
        "appointments": "/api/appointments",
    }))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn readyz() -> &'static str {
    "ok"
}

/// Prometheus テキストフォーマットでメトリクスを返す。
pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.gather_metrics()
}
