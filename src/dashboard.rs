//! Hospital administrator dashboard: roster, appointments, bed counts and
//! pricing for the hospital a user manages.
//!
//! The edit commands validate their input and confirm with a notification;
//! the catalog itself never changes.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Appointment, AppointmentStatus, Doctor, Hospital, Pricing, SessionUser};
use crate::notification::Notification;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("Available beds ({available}) cannot exceed total beds ({total})")]
    BedsExceedCapacity { available: u32, total: u32 },
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

impl DashboardError {
    pub fn to_notification(&self) -> Notification {
        Notification::destructive("Update Failed", self.to_string())
    }
}

// ═══════════════════════════════════════════════════════════
// Dashboard view
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_beds: u32,
    pub available_beds: u32,
    pub total_doctors: usize,
    pub upcoming_appointments: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub hospital: Hospital,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
    pub stats: DashboardStats,
}

impl DashboardView {
    /// Dashboard for the hospital this user manages: the one whose name
    /// equals the user's display name (ignoring case), otherwise the first
    /// hospital in the catalog. `None` only for an empty catalog.
    pub fn for_user(catalog: &Catalog, user: &SessionUser) -> Option<Self> {
        let hospital = catalog
            .hospitals()
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(user.name.trim()))
            .or_else(|| catalog.hospitals().first())?;

        let doctors: Vec<Doctor> = catalog.doctors_at(&hospital.id).into_iter().cloned().collect();
        let appointments: Vec<Appointment> = catalog
            .appointments_at(&hospital.id)
            .into_iter()
            .cloned()
            .collect();

        let stats = DashboardStats {
            total_beds: hospital.total_beds,
            available_beds: hospital.available_beds,
            total_doctors: doctors.len(),
            upcoming_appointments: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Upcoming)
                .count(),
        };

        Some(Self {
            hospital: hospital.clone(),
            doctors,
            appointments,
            stats,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedUpdate {
    pub total: u32,
    pub available: u32,
}

pub fn update_beds(update: &BedUpdate) -> Result<Notification, DashboardError> {
    if update.available > update.total {
        return Err(DashboardError::BedsExceedCapacity {
            available: update.available,
            total: update.total,
        });
    }
    tracing::info!(total = update.total, available = update.available, "Bed count updated");
    Ok(Notification::success(
        "Bed Count Updated",
        "Hospital bed availability has been updated successfully.",
    ))
}

pub fn update_pricing(pricing: &Pricing) -> Result<Notification, DashboardError> {
    tracing::info!(
        consultation = pricing.consultation,
        emergency = pricing.emergency,
        surgery = pricing.surgery,
        "Pricing updated"
    );
    Ok(Notification::success(
        "Pricing Updated",
        "Service pricing has been updated successfully.",
    ))
}

/// Add-doctor form as typed; numbers arrive as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewDoctorForm {
    pub name: String,
    pub specialization: String,
    pub experience: String,
    pub consultation_fee: String,
    pub education: String,
    pub description: String,
}

pub fn add_doctor(form: &NewDoctorForm) -> Result<Notification, DashboardError> {
    if form.name.trim().is_empty() {
        return Err(DashboardError::MissingField("name"));
    }
    if form.specialization.trim().is_empty() {
        return Err(DashboardError::MissingField("specialization"));
    }
    let experience = parse_whole("experience", &form.experience)?;
    let fee = parse_whole("consultationFee", &form.consultation_fee)?;

    tracing::info!(
        specialization = %form.specialization,
        experience,
        fee,
        "Doctor added to roster"
    );
    Ok(Notification::success(
        "Doctor Added",
        "New doctor has been added to your hospital successfully.",
    ))
}

fn parse_whole(field: &'static str, raw: &str) -> Result<u32, DashboardError> {
    raw.trim().parse().map_err(|_| DashboardError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}
