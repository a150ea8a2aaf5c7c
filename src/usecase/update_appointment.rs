use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::{AppointmentRecord, AppointmentStatus};
use crate::domain::repository::{AppointmentRepository, PetRepository};

#[derive(Debug, thiserror::Error)]
pub enum UpdateAppointmentError {
    #[error("appointment not found: {0}")]
    NotFound(Uuid),
    #[error("pet does not exist: {0}")]
    PetNotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdateAppointmentInput は更新対象フィールドの集合。None のフィールドは変更しない。
#[derive(Debug, Default)]
pub struct UpdateAppointmentInput {
    pub pet_id: Option<Uuid>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

/// UpdateAppointmentUseCase は既存予約の内容を書き換える。
/// pet_id を変更する場合は変更先のペットが存在することを確認する。
pub struct UpdateAppointmentUseCase {
    appointment_repo: Arc<dyn AppointmentRepository>,
    pet_repo: Arc<dyn PetRepository>,
}

impl UpdateAppointmentUseCase {
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
        id: Uuid,
        input: UpdateAppointmentInput,
    ) -> Result<AppointmentRecord, UpdateAppointmentError> {
        let record = self
            .appointment_repo
            .find_by_id(id)
            .await
            .map_err(|e| UpdateAppointmentError::Internal(e.to_string()))?
            .ok_or(UpdateAppointmentError::NotFound(id))?;

        let mut appointment = record.appointment;
        let mut pet_name = record.pet_name;

        if let Some(pet_id) = input.pet_id {
            let pet = self
                .pet_repo
                .find_by_id(pet_id)
                .await
                .map_err(|e| UpdateAppointmentError::Internal(e.to_string()))?
                .ok_or(UpdateAppointmentError::PetNotFound(pet_id))?;
            appointment.pet_id = pet.id;
            pet_name = Some(pet.name);
        }
        if let Some(appointment_date) = input.appointment_date {
            appointment.appointment_date = appointment_date;
        }
        if let Some(reason) = input.reason {
            appointment.reason = reason;
        }
        if let Some(status) = input.status {
            appointment.status = status;
        }
        if let Some(notes) = input.notes {
            appointment.notes = notes;
        }

        self.appointment_repo
            .update(&appointment)
            .await
            .map_err(|e| UpdateAppointmentError::Internal(e.to_string()))?;

        Ok(AppointmentRecord {
            appointment,
            pet_name,
        })
    }
}
