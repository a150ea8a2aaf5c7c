pub mod appointment_repository;
pub mod pet_repository;

pub use appointment_repository::AppointmentRepository;
pub use pet_repository::PetRepository;
