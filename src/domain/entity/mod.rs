pub mod appointment;
pub mod pet;

pub use appointment::{Appointment, AppointmentRecord, AppointmentStatus};
pub use pet::Pet;
