use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::adapter::serializer::FieldErrors;
use crate::usecase::{
    CreateAppointmentError, CreatePetError, DeleteAppointmentError, DeletePetError,
    GetAppointmentError, GetPetError, ListAppointmentsError, ListPetsError,
    UpdateAppointmentError, UpdatePetError,
};

/// ApiError はハンドラ層の統一エラー。ユースケースのエラーを HTTP の区分に畳み込む。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// 単一フィールドの検証エラーを組み立てる。
    pub fn single_field(field: &str, message: String) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message]);
        ApiError::Validation(errors)
    }
}

/// ErrorResponse は全エラーレスポンス共通の外形。
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "PETCLINIC_VALIDATION_ERROR",
                "validation failed".to_string(),
                Some(serde_json::json!(errors)),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                "PETCLINIC_NOT_FOUND",
                message,
                None,
            ),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PETCLINIC_INTERNAL_ERROR",
                    message,
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<CreatePetError> for ApiError {
    fn from(err: CreatePetError) -> Self {
        match err {
            CreatePetError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<GetPetError> for ApiError {
    fn from(err: GetPetError) -> Self {
        match err {
            GetPetError::NotFound(id) => ApiError::NotFound(format!("pet not found: {}", id)),
            GetPetError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<ListPetsError> for ApiError {
    fn from(err: ListPetsError) -> Self {
        match err {
            ListPetsError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<UpdatePetError> for ApiError {
    fn from(err: UpdatePetError) -> Self {
        match err {
            UpdatePetError::NotFound(id) => ApiError::NotFound(format!("pet not found: {}", id)),
            UpdatePetError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<DeletePetError> for ApiError {
    fn from(err: DeletePetError) -> Self {
        match err {
            DeletePetError::NotFound(id) => ApiError::NotFound(format!("pet not found: {}", id)),
            DeletePetError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<CreateAppointmentError> for ApiError {
    fn from(err: CreateAppointmentError) -> Self {
        match err {
            CreateAppointmentError::PetNotFound(id) => {
                ApiError::single_field("pet_id", format!("pet does not exist: {}", id))
            }
            CreateAppointmentError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<GetAppointmentError> for ApiError {
    fn from(err: GetAppointmentError) -> Self {
        match err {
            GetAppointmentError::NotFound(id) => {
                ApiError::NotFound(format!("appointment not found: {}", id))
            }
            GetAppointmentError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<ListAppointmentsError> for ApiError {
    fn from(err: ListAppointmentsError) -> Self {
        match err {
            ListAppointmentsError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<UpdateAppointmentError> for ApiError {
    fn from(err: UpdateAppointmentError) -> Self {
        match err {
            UpdateAppointmentError::NotFound(id) => {
                ApiError::NotFound(format!("appointment not found: {}", id))
            }
            UpdateAppointmentError::PetNotFound(id) => {
                ApiError::single_field("pet_id", format!("pet does not exist: {}", id))
            }
            UpdateAppointmentError::Internal(message) => ApiError::Internal(message),
        }
    }
}

impl From<DeleteAppointmentError> for ApiError {
    fn from(err: DeleteAppointmentError) -> Self {
        match err {
            DeleteAppointmentError::NotFound(id) => {
                ApiError::NotFound(format!("appointment not found: {}", id))
            }
            DeleteAppointmentError::Internal(message) => ApiError::Internal(message),
        }
    }
}
