pub mod appointment_handler;
pub mod error;
pub mod info_handler;
pub mod pet_handler;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::adapter::middleware::metrics::track_metrics;
use crate::infrastructure::config::RootView;
use crate::infrastructure::telemetry::Metrics;
use crate::infrastructure::template::TemplateEngine;
use crate::usecase::{
    CreateAppointmentUseCase, CreatePetUseCase, DeleteAppointmentUseCase, DeletePetUseCase,
    GetAppointmentUseCase, GetPetUseCase, ListAppointmentsUseCase, ListPetsUseCase,
    UpdateAppointmentUseCase, UpdatePetUseCase,
};

use error::ApiError;

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub create_pet_uc: Arc<CreatePetUseCase>,
    pub get_pet_uc: Arc<GetPetUseCase>,
    pub list_pets_uc: Arc<ListPetsUseCase>,
    pub update_pet_uc: Arc<UpdatePetUseCase>,
    pub delete_pet_uc: Arc<DeletePetUseCase>,
    pub create_appointment_uc: Arc<CreateAppointmentUseCase>,
    pub get_appointment_uc: Arc<GetAppointmentUseCase>,
    pub list_appointments_uc: Arc<ListAppointmentsUseCase>,
    pub update_appointment_uc: Arc<UpdateAppointmentUseCase>,
    pub delete_appointment_uc: Arc<DeleteAppointmentUseCase>,
    pub metrics: Arc<Metrics>,
    pub templates: Arc<TemplateEngine>,
    pub root_view: RootView,
}

/// パスパラメータの ID を UUID として解釈する。不正な形式は検証エラーになる。
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::single_field("id", "must be a valid UUID".to_string()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        info_handler::home,
        info_handler::api_root,
        info_handler::api_info,
        pet_handler::list_pets,
        pet_handler::create_pet,
        pet_handler::get_pet,
        pet_handler::put_pet,
        pet_handler::patch_pet,
        pet_handler::delete_pet,
        appointment_handler::list_appointments,
        appointment_handler::create_appointment,
        appointment_handler::get_appointment,
        appointment_handler::put_appointment,
        appointment_handler::patch_appointment,
        appointment_handler::delete_appointment,
    ),
    components(schemas(
        crate::adapter::serializer::PetResponse,
        crate::adapter::serializer::AppointmentResponse,
        error::ErrorResponse,
        error::ErrorDetail,
    )),
)]
struct ApiDoc;

/// REST API ルーターを構築する。
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/healthz", get(info_handler::healthz))
        .route("/readyz", get(info_handler::readyz))
        .route("/metrics", get(info_handler::metrics));

    let info_routes = Router::new()
        .route("/", get(info_handler::home))
        .route("/api", get(info_handler::api_root))
        .route("/api-info", get(info_handler::api_info));

    let api_routes = Router::new()
        .route(
            "/api/pets",
            get(pet_handler::list_pets).post(pet_handler::create_pet),
        )
        .route(
            "/api/pets/{id}",
            get(pet_handler::get_pet)
                .put(pet_handler::put_pet)
                .patch(pet_handler::patch_pet)
                .delete(pet_handler::delete_pet),
        )
        .route(
            "/api/appointments",
            get(appointment_handler::list_appointments).post(appointment_handler::create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            get(appointment_handler::get_appointment)
                .put(appointment_handler::put_appointment)
                .patch(appointment_handler::patch_appointment)
                .delete(appointment_handler::delete_appointment),
        );

    public_routes
        .merge(info_routes)
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            track_metrics,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
