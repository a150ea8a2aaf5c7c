use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repository::AppointmentRepository;

#[derive(Debug, thiserror::Error)]
pub enum DeleteAppointmentError {
    #[error("appointment not found: {0}")]
    NotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// DeleteAppointmentUseCase は予約を 1 件削除する。ペット側には影響しない。
pub struct DeleteAppointmentUseCase {
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl DeleteAppointmentUseCase {
    pub fn new(appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointment_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), DeleteAppointmentError> {
        self.appointment_repo
            .find_by_id(id)
            .await
            .map_err(|e| DeleteAppointmentError::Internal(e.to_string()))?
            .ok_or(DeleteAppointmentError::NotFound(id))?;

        self.appointment_repo
            .delete(id)
            .await
            .map_err(|e| DeleteAppointmentError::Internal(e.to_string()))?;

        tracing::info!(appointment_id = %id, "appointment deleted");

        Ok(())
    }
}
