use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pet はクリニックに登録されたペットのエンティティ。
/// id と created_at は作成時に確定し、以後変更されない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub owner_name: String,
    pub owner_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// 新しい Pet を作成する。created_at と updated_at は同一時刻になる。
    pub fn new(
        name: String,
        species: String,
        breed: String,
        age: i32,
        owner_name: String,
        owner_phone: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            species,
            breed,
            age,
            owner_name,
            owner_phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// 更新時刻を現在時刻に進める。フィールド変更後に呼び出す。
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
