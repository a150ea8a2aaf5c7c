use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Appointment, AppointmentRecord, AppointmentStatus};
use crate::domain::repository::AppointmentRepository;

/// AppointmentPostgresRepository は PostgreSQL 実装の予約リポジトリ。
/// 読み取りはペットを LEFT JOIN して pet_name を解決する。
pub struct AppointmentPostgresRepository {
    pool: PgPool,
}

impl AppointmentPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentPostgresRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<AppointmentRecord>> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT a.id, a.pet_id, a.appointment_date, a.reason, a.status, a.notes, a.created_at,
                   p.name AS pet_name
            FROM appointments a
            LEFT JOIN pets p ON p.id = a.pet_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<AppointmentRecord>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT a.id, a.pet_id, a.appointment_date, a.reason, a.status, a.notes, a.created_at,
                   p.name AS pet_name
            FROM appointments a
            LEFT JOIN pets p ON p.id = a.pet_id
            ORDER BY a.appointment_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let records: anyhow::Result<Vec<AppointmentRecord>> =
            rows.into_iter().map(|r| r.try_into()).collect();

        records
    }

    async fn create(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments
                (id, pet_id, appointment_date, reason, status, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.pet_id)
        .bind(appointment.appointment_date)
        .bind(&appointment.reason)
        .bind(appointment.status.to_string())
        .bind(&appointment.notes)
        .bind(appointment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET pet_id = $2, appointment_date = $3, reason = $4, status = $5, notes = $6
            WHERE id = $1
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.pet_id)
        .bind(appointment.appointment_date)
        .bind(&appointment.reason)
        .bind(appointment.status.to_string())
        .bind(&appointment.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// AppointmentRow はDB行からのマッピング用。pet_name は JOIN の結果で、
/// 参照先ペットが存在しない行では NULL になる。
#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    pet_id: Uuid,
    appointment_date: chrono::DateTime<chrono::Utc>,
    reason: String,
    status: String,
    notes: String,
    created_at: chrono::DateTime<chrono::Utc>,
    pet_name: Option<String>,
}

impl TryFrom<AppointmentRow> for AppointmentRecord {
    type Error = anyhow::Error;

    fn try_from(row: AppointmentRow) -> anyhow::Result<Self> {
        Ok(AppointmentRecord {
            appointment: Appointment {
                id: row.id,
                pet_id: row.pet_id,
                appointment_date: row.appointment_date,
                reason: row.reason,
                status: AppointmentStatus::from_str_value(&row.status)?,
                notes: row.notes,
                created_at: row.created_at,
            },
            pet_name: row.pet_name,
        })
    }
}
