use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::entity::Pet;
use crate::usecase::{CreatePetInput, UpdatePetInput};

use super::{
    ensure_object, int_field, reject_immutable_fields, require, string_field, FieldErrors,
    UpdateMode,
};

/// PetResponse はペットの API 表現。タイムスタンプは RFC 3339 文字列で返す。
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PetResponse {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub owner_name: String,
    pub owner_phone: String,
    pub created_at: String,
    pub updated_at: String,
}

pub fn to_pet_response(pet: &Pet) -> PetResponse {
    PetResponse {
        id: pet.id.to_string(),
        name: pet.name.clone(),
        species: pet.species.clone(),
        breed: pet.breed.clone(),
        age: pet.age,
        owner_name: pet.owner_name.clone(),
        owner_phone: pet.owner_phone.clone(),
        created_at: pet.created_at.to_rfc3339(),
        updated_at: pet.updated_at.to_rfc3339(),
    }
}

/// 登録ペイロードを検証して入力に変換する。breed のみ省略可で空文字に落ちる。
pub fn parse_create(payload: &Value) -> Result<CreatePetInput, FieldErrors> {
    let map = ensure_object(payload)?;
    let mut errors = FieldErrors::new();

    reject_immutable_fields(map, &mut errors);
    require(
        map,
        &["name", "species", "age", "owner_name", "owner_phone"],
        &mut errors,
    );

    let name = string_field(map, "name", &mut errors);
    let species = string_field(map, "species", &mut errors);
    let breed = string_field(map, "breed", &mut errors);
    let age = int_field(map, "age", &mut errors);
    let owner_name = string_field(map, "owner_name", &mut errors);
    let owner_phone = string_field(map, "owner_phone", &mut errors);

    match (name, species, age, owner_name, owner_phone) {
        (Some(name), Some(species), Some(age), Some(owner_name), Some(owner_phone))
            if errors.is_empty() =>
        {
            Ok(CreatePetInput {
                name,
                species,
                breed: breed.unwrap_or_default(),
                age,
                owner_name,
                owner_phone,
            })
        }
        _ => Err(errors),
    }
}

/// 更新ペイロードを検証する。Full は全必須フィールドの存在を要求し、
/// Partial は現れたフィールドだけを検証する。
pub fn parse_update(payload: &Value, mode: UpdateMode) -> Result<UpdatePetInput, FieldErrors> {
    let map = ensure_object(payload)?;
    let mut errors = FieldErrors::new();

    reject_immutable_fields(map, &mut errors);
    if mode == UpdateMode::Full {
        require(
            map,
            &["name", "species", "age", "owner_name", "owner_phone"],
            &mut errors,
        );
    }

    let input = UpdatePetInput {
        name: string_field(map, "name", &mut errors),
        species: string_field(map, "species", &mut errors),
        breed: string_field(map, "breed", &mut errors),
        age: int_field(map, "age", &mut errors),
        owner_name: string_field(map, "owner_name", &mut errors),
        owner_phone: string_field(map, "owner_phone", &mut errors),
    };

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}
