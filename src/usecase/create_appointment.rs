use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::{Appointment, AppointmentRecord, AppointmentStatus};
use crate::domain::repository::{AppointmentRepository, PetRepository};

#[derive(Debug, thiserror::Error)]
pub enum CreateAppointmentError {
    #[error("pet does not exist: {0}")]
    PetNotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// CreateAppointmentInput は検証済みの予約登録内容。
#[derive(Debug)]
pub struct CreateAppointmentInput {
    pub pet_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: String,
}

/// CreateAppointmentUseCase は予約を新規登録する。
/// 参照先のペットが存在しない場合はレコードを作らず失敗する。
pub struct CreateAppointmentUseCase {
    appointment_repo: Arc<dyn AppointmentRepository>,
    pet_repo: Arc<dyn PetRepository>,
}

impl CreateAppointmentUseCase {
    pub fn new(
        appointment_repo: Arc<dyn AppointmentRepository>,
        pet_repo: Arc<dyn PetRepository>,
    ) -> Self {
        Self {
            appointment_repo,
            pet_repo,
        }
    }

    pub async fn execute(
        &self,
        input: CreateAppointmentInput,
    ) -> Result<AppointmentRecord, CreateAppointmentError> {
        let pet = self
            .pet_repo
            .find_by_id(input.pet_id)
            .await
            .map_err(|e| CreateAppointmentError::Internal(e.to_string()))?
            .ok_or(CreateAppointmentError::PetNotFound(input.pet_id))?;

        let appointment = Appointment::new(
            input.pet_id,
            input.appointment_date,
            input.reason,
            input.status,
            input.notes,
        );

        self.appointment_repo
            .create(&appointment)
            .await
            .map_err(|e| CreateAppointmentError::Internal(e.to_string()))?;

        tracing::info!(
            appointment_id = %appointment.id,
            pet_id = %appointment.pet_id,
            "appointment registered"
        );

        Ok(AppointmentRecord {
            appointment,
            pet_name: Some(pet.name),
        })
    }
}
