pub mod create_appointment;
pub mod create_pet;
pub mod delete_appointment;
pub mod delete_pet;
pub mod get_appointment;
pub mod get_pet;
pub mod list_appointments;
pub mod list_pets;
pub mod update_appointment;
pub mod update_pet;

pub use create_appointment::{
    CreateAppointmentError, CreateAppointmentInput, CreateAppointmentUseCase,
};
pub use create_pet::{CreatePetError, CreatePetInput, CreatePetUseCase};
pub use delete_appointment::{DeleteAppointmentError, DeleteAppointmentUseCase};
pub use delete_pet::{DeletePetError, DeletePetUseCase};
pub use get_appointment::{GetAppointmentError, GetAppointmentUseCase};
pub use get_pet::{GetPetError, GetPetUseCase};
pub use list_appointments::{ListAppointmentsError, ListAppointmentsUseCase};
pub use list_pets::{ListPetsError, ListPetsUseCase};
pub use update_appointment::{
    UpdateAppointmentError, UpdateAppointmentInput, UpdateAppointmentUseCase,
};
pub use update_pet::{UpdatePetError, UpdatePetInput, UpdatePetUseCase};
