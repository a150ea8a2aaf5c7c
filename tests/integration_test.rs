/// petclinic-server integration tests
/// インメモリストアを使って REST API のエンドツーエンド動作を検証する。
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::DateTime;
use petclinic_server::adapter::handler::{self, AppState};
use petclinic_server::domain::repository::{AppointmentRepository, PetRepository};
use petclinic_server::infrastructure::config::RootView;
use petclinic_server::infrastructure::persistence::{
    InMemoryAppointmentRepository, InMemoryClinicStore, InMemoryPetRepository,
};
use petclinic_server::infrastructure::telemetry::Metrics;
use petclinic_server::infrastructure::template::TemplateEngine;
use petclinic_server::usecase::{
    CreateAppointmentUseCase, CreatePetUseCase, DeleteAppointmentUseCase, DeletePetUseCase,
    GetAppointmentUseCase, GetPetUseCase, ListAppointmentsUseCase, ListPetsUseCase,
    UpdateAppointmentUseCase, UpdatePetUseCase,
};
use tower::ServiceExt;
use uuid::Uuid;

fn make_test_app() -> axum::Router {
    make_test_app_with_root_view(RootView::Json)
}

fn make_test_app_with_root_view(root_view: RootView) -> axum::Router {
    let store = Arc::new(InMemoryClinicStore::new());
    let pet_repo: Arc<dyn PetRepository> = Arc::new(InMemoryPetRepository::new(store.clone()));
    let appointment_repo: Arc<dyn AppointmentRepository> =
        Arc::new(InMemoryAppointmentRepository::new(store));

    let state = AppState {
        create_pet_uc: Arc::new(CreatePetUseCase::new(pet_repo.clone())),
        get_pet_uc: Arc::new(GetPetUseCase::new(pet_repo.clone())),
        list_pets_uc: Arc::new(ListPetsUseCase::new(pet_repo.clone())),
        update_pet_uc: Arc::new(UpdatePetUseCase::new(pet_repo.clone())),
        delete_pet_uc: Arc::new(DeletePetUseCase::new(pet_repo.clone())),
        create_appointment_uc: Arc::new(CreateAppointmentUseCase::new(
            appointment_repo.clone(),
            pet_repo.clone(),
        )),
        get_appointment_uc: Arc::new(GetAppointmentUseCase::new(appointment_repo.clone())),
        list_appointments_uc: Arc::new(ListAppointmentsUseCase::new(appointment_repo.clone())),
        update_appointment_uc: Arc::new(UpdateAppointmentUseCase::new(
            appointment_repo.clone(),
            pet_repo.clone(),
        )),
        delete_appointment_uc: Arc::new(DeleteAppointmentUseCase::new(appointment_repo)),
        metrics: Arc::new(Metrics::new("test")),
        templates: Arc::new(TemplateEngine::new().unwrap()),
        root_view,
    };
    handler::router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// API 経由でペットを登録して、レスポンスボディを返すヘルパー。
async fn create_pet(app: &axum::Router, name: &str) -> serde_json::Value {
    let payload = serde_json::json!({
        "name": name,
        "species": "dog",
        "age": 3,
        "owner_name": "Sato Hanako",
        "owner_phone": "090-1234-5678",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/pets")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

/// API 経由で予約を登録して、レスポンスボディを返すヘルパー。
async fn create_appointment(app: &axum::Router, pet_id: &str, date: &str) -> serde_json::Value {
    let payload = serde_json::json!({
        "pet_id": pet_id,
        "appointment_date": date,
        "reason": "annual checkup",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/appointments")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- Integration Tests ---

#[tokio::test]
async fn test_full_health_check_flow() {
    let app = make_test_app();

    // healthz
    let req = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // readyz
    let req = Request::builder()
        .uri("/readyz")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // metrics には先行リクエストのカウンタが現れる
    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("http_requests_total"));
}

#[tokio::test]
async fn test_home_returns_welcome_payload() {
    let app = make_test_app();

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["message"], "Welcome to PetClinic! 🐾");
    assert_eq!(json["features"].as_array().unwrap().len(), 4);
    assert_eq!(json["endpoints"]["pets"], "/api/pets");
    assert_eq!(json["endpoints"]["appointments"], "/api/appointments");
}

#[tokio::test]
async fn test_home_html_mode() {
    let app = make_test_app_with_root_view(RootView::Html);

    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("PetClinic - Pet Management System"));

    // /api-info は設定にかかわらず JSON を返す
    let req = Request::builder()
        .uri("/api-info")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["message"], "Welcome to PetClinic! 🐾");
}

#[tokio::test]
async fn test_api_root_lists_collections() {
    let app = make_test_app();

    let req = Request::builder().uri("/api").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["pets"], "/api/pets");
    assert_eq!(json["appointments"], "/api/appointments");
}

#[tokio::test]
async fn test_create_pet_returns_created() {
    let app = make_test_app();

    let payload = serde_json::json!({
        "name": "Rex",
        "species": "dog",
        "breed": "shiba",
        "age": 3,
        "owner_name": "Sato Hanako",
        "owner_phone": "090-1234-5678",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/pets")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert_eq!(json["name"], "Rex");
    assert_eq!(json["breed"], "shiba");
    assert!(Uuid::parse_str(json["id"].as_str().unwrap()).is_ok());
    // 新規登録では created_at と updated_at が一致する
    assert_eq!(json["created_at"], json["updated_at"]);
}

#[tokio::test]
async fn test_create_pet_defaults_breed_to_empty() {
    let app = make_test_app();

    let json = create_pet(&app, "Rex").await;
    assert_eq!(json["breed"], "");
}

#[tokio::test]
async fn test_create_pet_validation_errors() {
    let app = make_test_app();

    // 必須フィールド欠落
    let req = Request::builder()
        .method("POST")
        .uri("/api/pets")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"Rex"}"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"]["code"], "PETCLINIC_VALIDATION_ERROR");
    assert_eq!(
        json["error"]["details"]["species"][0],
        "this field is required"
    );
    assert_eq!(json["error"]["details"]["age"][0], "this field is required");

    // 型違反
    let payload = serde_json::json!({
        "name": "Rex",
        "species": "dog",
        "age": "three",
        "owner_name": "Sato Hanako",
        "owner_phone": "090-1234-5678",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/pets")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"]["details"]["age"][0], "must be an integer");

    // クライアント指定の id は拒否
    let payload = serde_json::json!({
        "id": Uuid::new_v4().to_string(),
        "name": "Rex",
        "species": "dog",
        "age": 3,
        "owner_name": "Sato Hanako",
        "owner_phone": "090-1234-5678",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/pets")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"]["details"]["id"][0], "this field is immutable");
}

#[tokio::test]
async fn test_create_pet_ignores_unknown_fields() {
    let app = make_test_app();

    let payload = serde_json::json!({
        "name": "Rex",
        "species": "dog",
        "age": 3,
        "owner_name": "Sato Hanako",
        "owner_phone": "090-1234-5678",
        "favorite_toy": "ball",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/pets")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert!(json.get("favorite_toy").is_none());
}

#[tokio::test]
async fn test_list_pets_newest_first() {
    let app = make_test_app();

    create_pet(&app, "First").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_pet(&app, "Second").await;

    let req = Request::builder()
        .uri("/api/pets")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let pets = json.as_array().unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0]["name"], "Second");
    assert_eq!(pets[1]["name"], "First");
}

#[tokio::test]
async fn test_get_pet_flow() {
    let app = make_test_app();
    let created = create_pet(&app, "Rex").await;
    let id = created["id"].as_str().unwrap();

    // 取得
    let req = Request::builder()
        .uri(format!("/api/pets/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["name"], "Rex");

    // 存在しない ID は 404
    let req = Request::builder()
        .uri(format!("/api/pets/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["error"]["code"], "PETCLINIC_NOT_FOUND");

    // UUID でないパスは 400
    let req = Request::builder()
        .uri("/api/pets/not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"]["details"]["id"][0], "must be a valid UUID");
}

#[tokio::test]
async fn test_put_pet_requires_all_fields() {
    let app = make_test_app();
    let created = create_pet(&app, "Rex").await;
    let id = created["id"].as_str().unwrap();

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/pets/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"Taro"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(
        json["error"]["details"]["owner_phone"][0],
        "this field is required"
    );
}

#[tokio::test]
async fn test_put_pet_replaces_and_refreshes_updated_at() {
    let app = make_test_app();
    let created = create_pet(&app, "Rex").await;
    let id = created["id"].as_str().unwrap();
    let created_at = created["created_at"].as_str().unwrap().to_string();
    let updated_at_before =
        DateTime::parse_from_rfc3339(created["updated_at"].as_str().unwrap()).unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let payload = serde_json::json!({
        "name": "Taro",
        "species": "cat",
        "age": 5,
        "owner_name": "Suzuki Ichiro",
        "owner_phone": "080-9999-0000",
    });
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/pets/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["name"], "Taro");
    assert_eq!(json["species"], "cat");
    assert_eq!(json["age"], 5);
    // created_at は不変、updated_at は進む
    assert_eq!(json["created_at"], created_at);
    let updated_at_after =
        DateTime::parse_from_rfc3339(json["updated_at"].as_str().unwrap()).unwrap();
    assert!(updated_at_after > updated_at_before);
}

#[tokio::test]
async fn test_patch_pet_partial_update() {
    let app = make_test_app();
    let created = create_pet(&app, "Rex").await;
    let id = created["id"].as_str().unwrap();

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/pets/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"age":4}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["age"], 4);
    assert_eq!(json["name"], "Rex");
    assert_eq!(json["owner_name"], "Sato Hanako");
}

#[tokio::test]
async fn test_update_pet_not_found() {
    let app = make_test_app();

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/pets/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"age":4}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_pet_flow() {
    let app = make_test_app();
    let created = create_pet(&app, "Rex").await;
    let id = created["id"].as_str().unwrap();

    // 削除
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/pets/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // 取得は 404
    let req = Request::builder()
        .uri(format!("/api/pets/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 再削除も 404
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/pets/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_pet_cascades_to_appointments() {
    let app = make_test_app();
    let target = create_pet(&app, "Rex").await;
    let target_id = target["id"].as_str().unwrap();
    let other = create_pet(&app, "Mimi").await;
    let other_id = other["id"].as_str().unwrap();

    let a1 = create_appointment(&app, target_id, "2026-09-01T10:00:00Z").await;
    let a2 = create_appointment(&app, target_id, "2026-09-02T10:00:00Z").await;
    let survivor = create_appointment(&app, other_id, "2026-09-03T10:00:00Z").await;

    // ペット削除で従属予約も消える
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/pets/{}", target_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    for appointment in [&a1, &a2] {
        let req = Request::builder()
            .uri(format!(
                "/api/appointments/{}",
                appointment["id"].as_str().unwrap()
            ))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // 他ペットの予約は残る
    let req = Request::builder()
        .uri("/api/appointments")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let json = body_json(resp).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], survivor["id"]);
    assert_eq!(records[0]["pet_name"], "Mimi");
}

#[tokio::test]
async fn test_create_appointment_defaults() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;

    let json = create_appointment(&app, pet["id"].as_str().unwrap(), "2026-09-01T10:00:00Z").await;

    assert_eq!(json["status"], "scheduled");
    assert_eq!(json["notes"], "");
    assert_eq!(json["pet_name"], "Rex");
    assert_eq!(json["reason"], "annual checkup");
}

#[tokio::test]
async fn test_create_appointment_unknown_pet() {
    let app = make_test_app();

    let payload = serde_json::json!({
        "pet_id": Uuid::new_v4().to_string(),
        "appointment_date": "2026-09-01T10:00:00Z",
        "reason": "annual checkup",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/appointments")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["error"]["code"], "PETCLINIC_VALIDATION_ERROR");
    let message = json["error"]["details"]["pet_id"][0].as_str().unwrap();
    assert!(message.starts_with("pet does not exist"));
}

#[tokio::test]
async fn test_create_appointment_invalid_status_choice() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;

    let payload = serde_json::json!({
        "pet_id": pet["id"],
        "appointment_date": "2026-09-01T10:00:00Z",
        "reason": "annual checkup",
        "status": "done",
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/appointments")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(
        json["error"]["details"]["status"][0],
        "\"done\" is not a valid choice"
    );
}

#[tokio::test]
async fn test_list_appointments_date_order() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;
    let pet_id = pet["id"].as_str().unwrap();

    let later = create_appointment(&app, pet_id, "2026-09-10T10:00:00Z").await;
    let earlier = create_appointment(&app, pet_id, "2026-09-01T10:00:00Z").await;

    let req = Request::builder()
        .uri("/api/appointments")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], earlier["id"]);
    assert_eq!(records[1]["id"], later["id"]);
}

#[tokio::test]
async fn test_appointment_reflects_pet_rename() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;
    let pet_id = pet["id"].as_str().unwrap();
    let appointment = create_appointment(&app, pet_id, "2026-09-01T10:00:00Z").await;
    assert_eq!(appointment["pet_name"], "Rex");

    // ペット名を変更すると読み取り時の pet_name も変わる
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/pets/{}", pet_id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"Taro"}"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .uri(format!(
            "/api/appointments/{}",
            appointment["id"].as_str().unwrap()
        ))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["pet_name"], "Taro");
}

#[tokio::test]
async fn test_patch_appointment_status() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;
    let appointment =
        create_appointment(&app, pet["id"].as_str().unwrap(), "2026-09-01T10:00:00Z").await;

    let req = Request::builder()
        .method("PATCH")
        .uri(format!(
            "/api/appointments/{}",
            appointment["id"].as_str().unwrap()
        ))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status":"completed"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["reason"], "annual checkup");
    assert_eq!(json["appointment_date"], appointment["appointment_date"]);
}

#[tokio::test]
async fn test_put_appointment_full_replace() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;
    let pet_id = pet["id"].as_str().unwrap();
    let appointment = create_appointment(&app, pet_id, "2026-09-01T10:00:00Z").await;
    let appointment_id = appointment["id"].as_str().unwrap();

    // 必須フィールドが欠けた PUT は 400
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/appointments/{}", appointment_id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status":"cancelled"}"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 全フィールド指定の PUT で置き換え
    let payload = serde_json::json!({
        "pet_id": pet_id,
        "appointment_date": "2026-10-01T15:30:00Z",
        "reason": "vaccination",
        "status": "cancelled",
        "notes": "rescheduled by owner",
    });
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/appointments/{}", appointment_id))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["reason"], "vaccination");
    assert_eq!(json["status"], "cancelled");
    assert_eq!(json["notes"], "rescheduled by owner");
    assert_eq!(json["created_at"], appointment["created_at"]);
}

#[tokio::test]
async fn test_repoint_appointment_to_other_pet() {
    let app = make_test_app();
    let rex = create_pet(&app, "Rex").await;
    let mimi = create_pet(&app, "Mimi").await;
    let appointment =
        create_appointment(&app, rex["id"].as_str().unwrap(), "2026-09-01T10:00:00Z").await;

    // 実在するペットへの付け替え
    let payload = serde_json::json!({"pet_id": mimi["id"]});
    let req = Request::builder()
        .method("PATCH")
        .uri(format!(
            "/api/appointments/{}",
            appointment["id"].as_str().unwrap()
        ))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["pet_name"], "Mimi");

    // 存在しないペットへの付け替えは 400
    let payload = serde_json::json!({"pet_id": Uuid::new_v4().to_string()});
    let req = Request::builder()
        .method("PATCH")
        .uri(format!(
            "/api/appointments/{}",
            appointment["id"].as_str().unwrap()
        ))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_appointment_immutable_and_derived_fields() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;
    let appointment =
        create_appointment(&app, pet["id"].as_str().unwrap(), "2026-09-01T10:00:00Z").await;
    let appointment_id = appointment["id"].as_str().unwrap();

    // id の書き換えは拒否
    let payload = serde_json::json!({"id": Uuid::new_v4().to_string()});
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/appointments/{}", appointment_id))
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"]["details"]["id"][0], "this field is immutable");

    // 派生フィールド pet_name は未知フィールドとして無視される
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/appointments/{}", appointment_id))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"pet_name":"Hacked"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["pet_name"], "Rex");
}

#[tokio::test]
async fn test_delete_appointment_flow() {
    let app = make_test_app();
    let pet = create_pet(&app, "Rex").await;
    let pet_id = pet["id"].as_str().unwrap();
    let appointment = create_appointment(&app, pet_id, "2026-09-01T10:00:00Z").await;
    let appointment_id = appointment["id"].as_str().unwrap();

    // 削除
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/appointments/{}", appointment_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // 取得は 404
    let req = Request::builder()
        .uri(format!("/api/appointments/{}", appointment_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ペット側は残る
    let req = Request::builder()
        .uri(format!("/api/pets/{}", pet_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_appointment_not_found() {
    let app = make_test_app();

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/appointments/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status":"completed"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = body_json(resp).await;
    assert_eq!(json["error"]["code"], "PETCLINIC_NOT_FOUND");
}
