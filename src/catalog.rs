//! In-memory record set: hospitals, doctors, appointments.
//!
//! The catalog is immutable after construction. `Catalog::new` is the
//! record-construction boundary: bed counts, ratings and cross-record
//! references are checked there, so every lookup afterwards can assume a
//! consistent set.

use std::collections::HashSet;

use crate::models::{Appointment, Doctor, Hospital};
use crate::seed;

const MAX_RATING: f64 = 5.0;

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Hospital {hospital_id}: {available} available beds exceed {total} total")]
    BedsExceedCapacity {
        hospital_id: String,
        available: u32,
        total: u32,
    },
    #[error("{kind} {id}: rating {rating} outside 0-5")]
    RatingOutOfRange {
        kind: &'static str,
        id: String,
        rating: f64,
    },
    #[error("Review {review_id} on hospital {hospital_id}: rating {rating} outside 1-5")]
    ReviewRatingOutOfRange {
        hospital_id: String,
        review_id: String,
        rating: u8,
    },
    #[error("Doctor {doctor_id} references unknown hospital {hospital_id}")]
    UnknownHospital {
        doctor_id: String,
        hospital_id: String,
    },
    #[error("Doctor {doctor_id} names hospital {stated:?} but hospital {hospital_id} is {actual:?}")]
    HospitalNameMismatch {
        doctor_id: String,
        hospital_id: String,
        stated: String,
        actual: String,
    },
    #[error("Appointment {appointment_id} references unknown doctor {doctor_id}")]
    UnknownDoctor {
        appointment_id: String,
        doctor_id: String,
    },
}

// ═══════════════════════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Catalog {
    hospitals: Vec<Hospital>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
}

impl Catalog {
    /// Validate and assemble a record set. Record order is preserved.
    pub fn new(
        hospitals: Vec<Hospital>,
        doctors: Vec<Doctor>,
        appointments: Vec<Appointment>,
    ) -> Result<Self, CatalogError> {
        check_unique("hospital", hospitals.iter().map(|h| h.id.as_str()))?;
        check_unique("doctor", doctors.iter().map(|d| d.id.as_str()))?;
        check_unique("appointment", appointments.iter().map(|a| a.id.as_str()))?;

        for hospital in &hospitals {
            validate_hospital(hospital)?;
        }

        for doctor in &doctors {
            check_rating("Doctor", &doctor.id, doctor.rating)?;
            let hospital = hospitals
                .iter()
                .find(|h| h.id == doctor.hospital_id)
                .ok_or_else(|| CatalogError::UnknownHospital {
                    doctor_id: doctor.id.clone(),
                    hospital_id: doctor.hospital_id.clone(),
                })?;
            if hospital.name != doctor.hospital {
                return Err(CatalogError::HospitalNameMismatch {
                    doctor_id: doctor.id.clone(),
                    hospital_id: hospital.id.clone(),
                    stated: doctor.hospital.clone(),
                    actual: hospital.name.clone(),
                });
            }
        }

        for appointment in &appointments {
            if !doctors.iter().any(|d| d.id == appointment.doctor_id) {
                return Err(CatalogError::UnknownDoctor {
                    appointment_id: appointment.id.clone(),
                    doctor_id: appointment.doctor_id.clone(),
                });
            }
        }

        tracing::debug!(
            hospitals = hospitals.len(),
            doctors = doctors.len(),
            appointments = appointments.len(),
            "Catalog loaded"
        );

        Ok(Self {
            hospitals,
            doctors,
            appointments,
        })
    }

    /// The built-in seed records.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::new(seed::hospitals(), seed::doctors(), seed::appointments())
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn hospital(&self, id: &str) -> Option<&Hospital> {
        self.hospitals.iter().find(|h| h.id == id)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Doctors on a hospital's roster, in record order.
    pub fn doctors_at(&self, hospital_id: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.hospital_id == hospital_id)
            .collect()
    }

    /// Appointments with any doctor on a hospital's roster.
    pub fn appointments_at(&self, hospital_id: &str) -> Vec<&Appointment> {
        let roster: HashSet<&str> = self
            .doctors_at(hospital_id)
            .into_iter()
            .map(|d| d.id.as_str())
            .collect();
        self.appointments
            .iter()
            .filter(|a| roster.contains(a.doctor_id.as_str()))
            .collect()
    }

    /// Distinct hospital specializations, sorted.
    pub fn hospital_specializations(&self) -> Vec<&str> {
        distinct(self.hospitals.iter().flat_map(|h| h.specializations.iter()))
    }

    /// Distinct doctor specializations, sorted.
    pub fn doctor_specializations(&self) -> Vec<&str> {
        distinct(self.doctors.iter().map(|d| &d.specialization))
    }

    /// Distinct accepted insurance names, sorted.
    pub fn insurance_options(&self) -> Vec<&str> {
        distinct(self.hospitals.iter().flat_map(|h| h.accepted_insurance.iter()))
    }
}

fn validate_hospital(hospital: &Hospital) -> Result<(), CatalogError> {
    if hospital.available_beds > hospital.total_beds {
        return Err(CatalogError::BedsExceedCapacity {
            hospital_id: hospital.id.clone(),
            available: hospital.available_beds,
            total: hospital.total_beds,
        });
    }
    check_rating("Hospital", &hospital.id, hospital.rating)?;
    for review in &hospital.reviews {
        if !(1..=5).contains(&review.rating) {
            return Err(CatalogError::ReviewRatingOutOfRange {
                hospital_id: hospital.id.clone(),
                review_id: review.id.clone(),
                rating: review.rating,
            });
        }
    }
    Ok(())
}

fn check_rating(kind: &'static str, id: &str, rating: f64) -> Result<(), CatalogError> {
    // NaN fails the range check too
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(CatalogError::RatingOutOfRange {
            kind,
            id: id.to_string(),
            rating,
        });
    }
    Ok(())
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut unique: Vec<&str> = values.map(String::as_str).collect();
    unique.sort_unstable();
    unique.dedup();
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Catalog {
        Catalog::seeded().expect("seed data is consistent")
    }

    #[test]
    fn seed_loads_in_record_order() {
        let catalog = seeded();
        let ids: Vec<&str> = catalog.hospitals().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(catalog.doctors().len(), 3);
        assert_eq!(catalog.appointments().len(), 2);
    }

    #[test]
    fn lookups_by_id() {
        let catalog = seeded();
        assert_eq!(catalog.hospital("2").unwrap().name, "St. Mary Medical Center");
        assert_eq!(catalog.doctor("1").unwrap().name, "Dr. Sarah Williams");
        assert!(catalog.doctor("999").is_none());
        assert!(catalog.hospital("").is_none());
    }

    #[test]
    fn roster_and_appointments_per_hospital() {
        let catalog = seeded();
        let roster: Vec<&str> = catalog.doctors_at("1").iter().map(|d| d.id.as_str()).collect();
        assert_eq!(roster, vec!["1", "2"]);
        assert_eq!(catalog.appointments_at("1").len(), 2);
        assert!(catalog.appointments_at("3").is_empty());
    }

    #[test]
    fn picker_options_are_distinct_and_sorted() {
        let catalog = seeded();
        let insurance = catalog.insurance_options();
        assert_eq!(
            insurance,
            vec!["Aetna", "Blue Cross", "Cigna", "Humana", "Medicaid", "Medicare", "United Healthcare"]
        );
        assert_eq!(
            catalog.doctor_specializations(),
            vec!["Cardiology", "Neurology", "Pediatrics"]
        );
        let specs = catalog.hospital_specializations();
        assert_eq!(specs.len(), 12);
        assert!(specs.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn rejects_available_beds_above_total() {
        let mut hospitals = seed::hospitals();
        hospitals[0].available_beds = hospitals[0].total_beds + 1;
        let err = Catalog::new(hospitals, seed::doctors(), seed::appointments()).unwrap_err();
        assert!(matches!(err, CatalogError::BedsExceedCapacity { .. }));
    }

    #[test]
    fn rejects_dangling_hospital_reference() {
        let mut doctors = seed::doctors();
        doctors[2].hospital_id = "42".into();
        let err = Catalog::new(seed::hospitals(), doctors, seed::appointments()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownHospital {
                doctor_id: "3".into(),
                hospital_id: "42".into(),
            }
        );
    }

    #[test]
    fn rejects_stale_denormalized_hospital_name() {
        let mut doctors = seed::doctors();
        doctors[0].hospital = "City Hospital".into();
        let err = Catalog::new(seed::hospitals(), doctors, seed::appointments()).unwrap_err();
        assert!(matches!(err, CatalogError::HospitalNameMismatch { .. }));
    }

    #[test]
    fn rejects_dangling_doctor_reference() {
        let mut appointments = seed::appointments();
        appointments[0].doctor_id = "7".into();
        let err = Catalog::new(seed::hospitals(), seed::doctors(), appointments).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDoctor { .. }));
    }

    #[test]
    fn rejects_bad_ratings() {
        let mut hospitals = seed::hospitals();
        hospitals[1].rating = 5.5;
        assert!(matches!(
            Catalog::new(hospitals, seed::doctors(), seed::appointments()),
            Err(CatalogError::RatingOutOfRange { .. })
        ));

        let mut hospitals = seed::hospitals();
        hospitals[0].reviews[0].rating = 0;
        assert!(matches!(
            Catalog::new(hospitals, seed::doctors(), seed::appointments()),
            Err(CatalogError::ReviewRatingOutOfRange { .. })
        ));

        let mut doctors = seed::doctors();
        doctors[0].rating = f64::NAN;
        assert!(matches!(
            Catalog::new(seed::hospitals(), doctors, seed::appointments()),
            Err(CatalogError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut doctors = seed::doctors();
        doctors[1].id = "1".into();
        let err = Catalog::new(seed::hospitals(), doctors, seed::appointments()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                kind: "doctor",
                id: "1".into(),
            }
        );
    }
}
