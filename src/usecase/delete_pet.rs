use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repository::PetRepository;

#[derive(Debug, thiserror::Error)]
pub enum DeletePetError {
    #[error("pet not found: {0}")]
    NotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// DeletePetUseCase はペットを削除する。参照中の予約もまとめて消える
/// (カスケード削除)。削除した予約の件数を返す。
pub struct DeletePetUseCase {
    pet_repo: Arc<dyn PetRepository>,
}

impl DeletePetUseCase {
    pub fn new(pet_repo: Arc<dyn PetRepository>) -> Self {
        Self { pet_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<u64, DeletePetError> {
        self.pet_repo
            .find_by_id(id)
            .await
            .map_err(|e| DeletePetError::Internal(e.to_string()))?
            .ok_or(DeletePetError::NotFound(id))?;

        let removed = self
            .pet_repo
            .delete_with_appointments(id)
            .await
            .map_err(|e| DeletePetError::Internal(e.to_string()))?;

        tracing::info!(
            pet_id = %id,
            appointments_removed = removed,
            "pet deleted with dependent appointments"
        );

        Ok(removed)
    }
}
