pub mod appointment_postgres;
pub mod memory;
pub mod pet_postgres;

pub use appointment_postgres::AppointmentPostgresRepository;
pub use memory::{InMemoryAppointmentRepository, InMemoryClinicStore, InMemoryPetRepository};
pub use pet_postgres::PetPostgresRepository;
