use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::Pet;

/// PetRepository はペット永続化のためのリポジトリトレイト。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// ID でペットを検索する。
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Pet>>;

    /// 全ペットを登録の新しい順 (created_at 降順) で取得する。
    async fn find_all(&self) -> anyhow::Result<Vec<Pet>>;

    /// ペットを作成する。
    async fn create(&self, pet: &Pet) -> anyhow::Result<()>;

    /// ペットを更新する。
    async fn update(&self, pet: &Pet) -> anyhow::Result<()>;

    /// ペットと、そのペットを参照する全予約を同一トランザクションで削除する。
    /// 削除した予約の件数を返す。
    async fn delete_with_appointments(&self, id: Uuid) -> anyhow::Result<u64>;
}
