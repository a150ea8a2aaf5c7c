use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entity::Pet;
use crate::domain::repository::PetRepository;

#[derive(Debug, thiserror::Error)]
pub enum UpdatePetError {
    #[error("pet not found: {0}")]
    NotFound(Uuid),
    #[error("internal error: {0}")]
    Internal(String),
}

/// UpdatePetInput は更新対象フィールドの集合。None のフィールドは変更しない。
/// PUT と PATCH の必須フィールド検証はシリアライザ側で行われる。
#[derive(Debug, Default)]
pub struct UpdatePetInput {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
}

/// UpdatePetUseCase は既存ペットの内容を書き換え、updated_at を進める。
pub struct UpdatePetUseCase {
    pet_repo: Arc<dyn PetRepository>,
}

impl UpdatePetUseCase {
    pub fn new(pet_repo: Arc<dyn PetRepository>) -> Self {
        Self { pet_repo }
    }

    pub async fn execute(&self, id: Uuid, input: UpdatePetInput) -> Result<Pet, UpdatePetError> {
        let mut pet = self
            .pet_repo
            .find_by_id(id)
            .await
            .map_err(|e| UpdatePetError::Internal(e.to_string()))?
            .ok_or(UpdatePetError::NotFound(id))?;

        if let Some(name) = input.name {
            pet.name = name;
        }
        if let Some(species) = input.species {
            pet.species = species;
        }
        if let Some(breed) = input.breed {
            pet.breed = breed;
        }
        if let Some(age) = input.age {
            pet.age = age;
        }
        if let Some(owner_name) = input.owner_name {
            pet.owner_name = owner_name;
        }
        if let Some(owner_phone) = input.owner_phone {
            pet.owner_phone = owner_phone;
        }
        pet.touch();

        self.pet_repo
            .update(&pet)
            .await
            .map_err(|e| UpdatePetError::Internal(e.to_string()))?;

        Ok(pet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::pet_repository::MockPetRepository;

    fn make_pet() -> Pet {
        Pet::new(
            "Rex".to_string(),
            "dog".to_string(),
            "Shiba Inu".to_string(),
            3,
            "Taro Yamada".to_string(),
            "090-0000-0000".to_string(),
        )
    }

    #[tokio::test]
    async fn test_update_pet_partial() {
        let pet = make_pet();
        let pet_id = pet.id;
        let pet_clone = pet.clone();

        let mut mock = MockPetRepository::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(Some(pet_clone.clone())));
        mock.expect_update().returning(|_| Ok(()));

        let uc = UpdatePetUseCase::new(Arc::new(mock));
        let input = UpdatePetInput {
            age: Some(4),
            ..UpdatePetInput::default()
        };
        let updated = uc.execute(pet_id, input).await.unwrap();

        assert_eq!(updated.age, 4);
        assert_eq!(updated.name, "Rex");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_pet_refreshes_updated_at() {
        let pet = make_pet();
        let pet_id = pet.id;
        let before = pet.updated_at;
        let pet_clone = pet.clone();

        let mut mock = MockPetRepository::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(Some(pet_clone.clone())));
        mock.expect_update().returning(|_| Ok(()));

        let uc = UpdatePetUseCase::new(Arc::new(mock));
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let updated = uc
            .execute(pet_id, UpdatePetInput::default())
            .await
            .unwrap();

        assert!(updated.updated_at > before);
    }

    #[tokio::test]
    async fn test_update_pet_not_found() {
        let mut mock = MockPetRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let uc = UpdatePetUseCase::new(Arc::new(mock));
        let result = uc.execute(Uuid::new_v4(), UpdatePetInput::default()).await;

        assert!(matches!(result, Err(UpdatePetError::NotFound(_))));
    }
}
