use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Pet;
use crate::domain::repository::PetRepository;

/// PetPostgresRepository は PostgreSQL 実装のペットリポジトリ。
pub struct PetPostgresRepository {
    pool: PgPool,
}

impl PetPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PetPostgresRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Pet>> {
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            SELECT id, name, species, breed, age, owner_name, owner_phone, created_at, updated_at
            FROM pets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Pet>> {
        let rows = sqlx::query_as::<_, PetRow>(
            r#"
            SELECT id, name, species, breed, age, owner_name, owner_phone, created_at, updated_at
            FROM pets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, pet: &Pet) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pets
                (id, name, species, breed, age, owner_name, owner_phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(pet.id)
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.owner_name)
        .bind(&pet.owner_phone)
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, pet: &Pet) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE pets
            SET name = $2, species = $3, breed = $4, age = $5,
                owner_name = $6, owner_phone = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(pet.id)
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.owner_name)
        .bind(&pet.owner_phone)
        .bind(pet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_with_appointments(&self, id: Uuid) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM appointments WHERE pet_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(removed)
    }
}

/// PetRow はDB行からのマッピング用。
#[derive(sqlx::FromRow)]
struct PetRow {
    id: Uuid,
    name: String,
    species: String,
    breed: String,
    age: i32,
    owner_name: String,
    owner_phone: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Pet {
            id: row.id,
            name: row.name,
            species: row.species,
            breed: row.breed,
            age: row.age,
            owner_name: row.owner_name,
            owner_phone: row.owner_phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
