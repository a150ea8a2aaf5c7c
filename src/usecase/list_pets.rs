use std::sync::Arc;

use crate::domain::entity::Pet;
use crate::domain::repository::PetRepository;

#[derive(Debug, thiserror::Error)]
pub enum ListPetsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// ListPetsUseCase は全ペットを登録の新しい順で取得する。
pub struct ListPetsUseCase {
    pet_repo: Arc<dyn PetRepository>,
}

impl ListPetsUseCase {
    pub fn new(pet_repo: Arc<dyn PetRepository>) -> Self {
        Self { pet_repo }
    }

    pub async fn execute(&self) -> Result<Vec<Pet>, ListPetsError> {
        self.pet_repo
            .find_all()
            .await
            .map_err(|e| ListPetsError::Internal(e.to_string()))
    }
}
