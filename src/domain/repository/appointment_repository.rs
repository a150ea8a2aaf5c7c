use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::{Appointment, AppointmentRecord};

/// AppointmentRepository は予約永続化のためのリポジトリトレイト。
/// 読み取り系は参照先ペットの名前を解決した AppointmentRecord を返す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// ID で予約を検索する。
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<AppointmentRecord>>;

    /// 全予約を予約日時の早い順 (appointment_date 昇順) で取得する。
    async fn find_all(&self) -> anyhow::Result<Vec<AppointmentRecord>>;

    /// 予約を作成する。
    async fn create(&self, appointment: &Appointment) -> anyhow::Result<()>;

    /// 予約を更新する。
    async fn update(&self, appointment: &Appointment) -> anyhow::Result<()>;

    /// 予約を削除する。
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}
