pub mod appointment_policy;
pub mod appointment_service;

pub use appointment_policy::AppointmentPolicy;
pub use appointment_service::{AppointmentService, CreateAppointment, UpdateAppointment};
