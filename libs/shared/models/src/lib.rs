pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod error;

pub use appointment::{Appointment, AppointmentStatus};
pub use doctor::{DoctorProfile, UserProfile, UserRole};
