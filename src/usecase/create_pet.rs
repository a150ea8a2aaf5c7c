use std::sync::Arc;

use crate::domain::entity::Pet;
use crate::domain::repository::PetRepository;

#[derive(Debug, thiserror::Error)]
pub enum CreatePetError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// CreatePetInput は検証済みのペット登録内容。
#[derive(Debug)]
pub struct CreatePetInput {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub owner_name: String,
    pub owner_phone: String,
}

/// CreatePetUseCase はペットを新規登録する。
pub struct CreatePetUseCase {
    pet_repo: Arc<dyn PetRepository>,
}

impl CreatePetUseCase {
    pub fn new(pet_repo: Arc<dyn PetRepository>) -> Self {
        Self { pet_repo }
    }

    pub async fn execute(&self, input: CreatePetInput) -> Result<Pet, CreatePetError> {
        let pet = Pet::new(
            input.name,
            input.species,
            input.breed,
            input.age,
            input.owner_name,
            input.owner_phone,
        );

        self.pet_repo
            .create(&pet)
            .await
            .map_err(|e| CreatePetError::Internal(e.to_string()))?;

        tracing::info!(pet_id = %pet.id, name = %pet.name, "pet registered");

        Ok(pet)
    }
}
