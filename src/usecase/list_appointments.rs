use std::sync::Arc;

use crate::domain::entity::AppointmentRecord;
use crate::domain::repository::AppointmentRepository;

#[derive(Debug, thiserror::Error)]
pub enum ListAppointmentsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// ListAppointmentsUseCase は全予約を予約日時の早い順で取得する。
pub struct ListAppointmentsUseCase {
    appointment_repo: Arc<dyn AppointmentRepository>,
}

impl ListAppointmentsUseCase {
    pub fn new(appointment_repo: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointment_repo }
    }

    pub async fn execute(&self) -> Result<Vec<AppointmentRecord>, ListAppointmentsError> {
        self.appointment_repo
            .find_all()
            .await
            .map_err(|e| ListAppointmentsError::Internal(e.to_string()))
    }
}
