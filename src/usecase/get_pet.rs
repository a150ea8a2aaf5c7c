use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entity::Pet;
use crate::domain::repository::PetRepository;

#[derive(Debug, thiserror::Error)]
pub enum GetPetError {
    #[error("pet not found: {0}")]
    NotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// GetPetUseCase は ID を指定して単一のペットを取得する。
pub struct GetPetUseCase {
    pet_repo: Arc<dyn PetRepository>,
}

impl GetPetUseCase {
    pub fn new(pet_repo: Arc<dyn PetRepository>) -> Self {
        Self { pet_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Pet, GetPetError> {
        self.pet_repo
            .find_by_id(id)
            .await
            .map_err(|e| GetPetError::Internal(e.to_string()))?
            .ok_or(GetPetError::NotFound(id))
    }
}
