pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod hospital;
pub mod review;
pub mod user;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use enums::{AppointmentStatus, Role, Weekday};
pub use hospital::{Hospital, Pricing};
pub use review::Review;
pub use user::SessionUser;

/// Errors raised while parsing model values.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid {field} value: {value:?}")]
    InvalidEnum { field: String, value: String },
}
