use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// AppointmentStatus は予約のステータス。状態遷移の制約は持たず、
/// どの値からどの値へも変更できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl AppointmentStatus {
    pub fn from_str_value(s: &str) -> anyhow::Result<Self> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => anyhow::bail!("invalid appointment status: {}", s),
        }
    }
}

/// Appointment は特定のペットに紐づく予約エンティティ。
/// ペットへの参照は pet_id のみで保持し、ペット側の情報は持たない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// 新しい Appointment を作成する。
    pub fn new(
        pet_id: Uuid,
        appointment_date: DateTime<Utc>,
        reason: String,
        status: AppointmentStatus,
        notes: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pet_id,
            appointment_date,
            reason,
            status,
            notes,
            created_at: Utc::now(),
        }
    }
}

/// AppointmentRecord は参照先ペットの名前を読み取り時に解決した予約レコード。
/// pet_name は保存されず、参照先が存在しない場合は None になる。
#[derive(Debug, Clone)]
pub struct AppointmentRecord {
    pub appointment: Appointment,
    pub pet_name: Option<String>,
}
