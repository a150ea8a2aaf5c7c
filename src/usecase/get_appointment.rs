use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entity::AppointmentRecord;
use crate::domain::repository::AppointmentRepository;

#[derive(Debug, thiserror::Error)]
pub enum GetAppointmentError {
    #[error("appointment not found: {0}")]
    NotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// GetAppointmentUseCase は ID を指定して単一の予約を取得する。
/// 参照先ペットの名前は読み取り時に解決される。
pub struct GetAppointmentUseCase {
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl GetAppointmentUseCase {
    pub fn new(appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointment_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<AppointmentRecord, GetAppointmentError> {
        self.appointment_repo
            .find_by_id(id)
            .await
            .map_err(|e| GetAppointmentError::Internal(e.to_string()))?
            .ok_or(GetAppointmentError::NotFound(id))
    }
}
