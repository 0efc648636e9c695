//! Appointment booking and the patient's appointment list.
//!
//! Booking, cancelling and rescheduling validate their input and answer
//! with a notification. None of them writes to the catalog: the record
//! set is fixed for the life of the process.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentStatus, Doctor, SessionUser};
use crate::notification::Notification;
use crate::session::Session;

/// Bookable consultation slots.
pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("You need to be logged in to manage appointments")]
    LoginRequired,
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{0} is not an available time slot")]
    InvalidTimeSlot(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Appointment is already cancelled")]
    AlreadyCancelled,
}

impl BookingError {
    pub fn to_notification(&self) -> Notification {
        match self {
            Self::LoginRequired => Notification::destructive(
                "Please log in",
                "You need to be logged in to book an appointment.",
            ),
            other => Notification::destructive("Booking Failed", other.to_string()),
        }
    }
}

// ═══════════════════════════════════════════
// Booking
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub reason: String,
    pub patient_name: String,
    pub phone: String,
    pub email: String,
}

impl BookingRequest {
    /// Empty form with contact fields taken from the logged-in user.
    pub fn prefilled(user: Option<&SessionUser>) -> Self {
        Self {
            patient_name: user.map(|u| u.name.clone()).unwrap_or_default(),
            email: user.map(|u| u.email.clone()).unwrap_or_default(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<NaiveDate, BookingError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| BookingError::InvalidDate(self.date.clone()))?;
        if !TIME_SLOTS.contains(&self.time.as_str()) {
            return Err(BookingError::InvalidTimeSlot(self.time.clone()));
        }
        for (field, value) in [
            ("patientName", &self.patient_name),
            ("phone", &self.phone),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::MissingField(field));
            }
        }
        Ok(date)
    }
}

/// Book a consultation. Nothing is stored; the caller gets the
/// confirmation to show.
pub fn book(
    session: &Session,
    doctor: &Doctor,
    request: &BookingRequest,
) -> Result<Notification, BookingError> {
    if !session.is_authenticated() {
        return Err(BookingError::LoginRequired);
    }
    let date = request.validate()?;

    tracing::info!(doctor_id = %doctor.id, %date, time = %request.time, "Appointment booked");

    Ok(Notification::success(
        "Appointment Booked!",
        format!(
            "Your appointment with {} has been scheduled for {} at {}.",
            doctor.name, request.date, request.time
        ),
    ))
}

// ═══════════════════════════════════════════
// My appointments
// ═══════════════════════════════════════════

/// Appointments grouped the way the list page tabs show them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentBuckets {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
    pub cancelled: Vec<Appointment>,
}

impl AppointmentBuckets {
    pub fn from_appointments<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        let mut buckets = Self::default();
        for appointment in appointments {
            let bucket = match appointment.status {
                AppointmentStatus::Upcoming => &mut buckets.upcoming,
                AppointmentStatus::Completed => &mut buckets.past,
                AppointmentStatus::Cancelled => &mut buckets.cancelled,
            };
            bucket.push(appointment.clone());
        }
        buckets
    }
}

pub fn cancel(session: &Session, appointment: &Appointment) -> Result<Notification, BookingError> {
    if !session.is_authenticated() {
        return Err(BookingError::LoginRequired);
    }
    if appointment.status == AppointmentStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled);
    }

    tracing::info!(appointment_id = %appointment.id, "Appointment cancelled");
    Ok(Notification::success(
        "Appointment Cancelled",
        "Your appointment has been cancelled successfully.",
    ))
}

pub fn reschedule(
    session: &Session,
    appointment: &Appointment,
) -> Result<Notification, BookingError> {
    if !session.is_authenticated() {
        return Err(BookingError::LoginRequired);
    }
    if appointment.status == AppointmentStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled);
    }

    Ok(Notification::success(
        "Reschedule Request",
        "Please contact the hospital to reschedule your appointment.",
    ))
}
