use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{Appointment, AppointmentRecord, Pet};
use crate::domain::repository::{AppointmentRepository, PetRepository};

/// InMemoryClinicStore はインメモリのデータストア。
/// database 設定がない開発モードと統合テストで使用する。
/// 両エンティティを 1 つのストアに持ち、カスケード削除が両方に届くようにする。
#[derive(Default)]
pub struct InMemoryClinicStore {
    pets: RwLock<Vec<Pet>>,
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// InMemoryPetRepository はインメモリ実装のペットリポジトリ。
pub struct InMemoryPetRepository {
    store: Arc<InMemoryClinicStore>,
}

impl InMemoryPetRepository {
    pub fn new(store: Arc<InMemoryClinicStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Pet>> {
        let pets = self.store.pets.read().await;
        Ok(pets.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Pet>> {
        let mut pets = self.store.pets.read().await.clone();
        pets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pets)
    }

    async fn create(&self, pet: &Pet) -> anyhow::Result<()> {
        let mut pets = self.store.pets.write().await;
        pets.push(pet.clone());
        Ok(())
    }

    async fn update(&self, pet: &Pet) -> anyhow::Result<()> {
        let mut pets = self.store.pets.write().await;
        if let Some(slot) = pets.iter_mut().find(|p| p.id == pet.id) {
            *slot = pet.clone();
        }
        Ok(())
    }

    async fn delete_with_appointments(&self, id: Uuid) -> anyhow::Result<u64> {
        // ロックは常に pets -> appointments の順で取得する。
        let mut pets = self.store.pets.write().await;
        let mut appointments = self.store.appointments.write().await;

        let before = appointments.len();
        appointments.retain(|a| a.pet_id != id);
        let removed = (before - appointments.len()) as u64;

        pets.retain(|p| p.id != id);

        Ok(removed)
    }
}

/// InMemoryAppointmentRepository はインメモリ実装の予約リポジトリ。
/// pet_name は読み取り時にストアのペットから解決する。
pub struct InMemoryAppointmentRepository {
    store: Arc<InMemoryClinicStore>,
}

impl InMemoryAppointmentRepository {
    pub fn new(store: Arc<InMemoryClinicStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<AppointmentRecord>> {
        // 予約のロックを手放してからペットを引く。
        let appointment = {
            let appointments = self.store.appointments.read().await;
            appointments.iter().find(|a| a.id == id).cloned()
        };

        let Some(appointment) = appointment else {
            return Ok(None);
        };

        let pets = self.store.pets.read().await;
        let pet_name = pets
            .iter()
            .find(|p| p.id == appointment.pet_id)
            .map(|p| p.name.clone());

        Ok(Some(AppointmentRecord {
            appointment,
            pet_name,
        }))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<AppointmentRecord>> {
        let mut appointments = {
            let guard = self.store.appointments.read().await;
            guard.clone()
        };
        appointments.sort_by_key(|a| a.appointment_date);

        let pets = self.store.pets.read().await;
        let records = appointments
            .into_iter()
            .map(|appointment| {
                let pet_name = pets
                    .iter()
                    .find(|p| p.id == appointment.pet_id)
                    .map(|p| p.name.clone());
                AppointmentRecord {
                    appointment,
                    pet_name,
                }
            })
            .collect();

        Ok(records)
    }

    async fn create(&self, appointment: &Appointment) -> anyhow::Result<()> {
        let mut appointments = self.store.appointments.write().await;
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> anyhow::Result<()> {
        let mut appointments = self.store.appointments.write().await;
        if let Some(slot) = appointments.iter_mut().find(|a| a.id == appointment.id) {
            *slot = appointment.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        let mut appointments = self.store.appointments.write().await;
        appointments.retain(|a| a.id != id);
        Ok(())
    }
}
