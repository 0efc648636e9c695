//! Hospital and doctor search.
//!
//! Every search is a list of tagged criteria applied to the full record set
//! from scratch: a record is kept when all active criteria hold, and the
//! result keeps record order. An empty criterion (empty text, no insurance
//! selected) is inactive and keeps everything. Search text is matched as
//! typed, surrounding whitespace included.
//!
//! Query-string forms (`DoctorQuery`, `HospitalQuery`) use the same
//! parameter names as the list pages and turn into criteria lists.

use serde::{Deserialize, Serialize};

use crate::models::{Doctor, Hospital, Weekday};

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Unknown day: {0:?}")]
    InvalidDay(String),
    #[error("{field} must be true or false, got {value:?}")]
    InvalidFlag { field: &'static str, value: String },
}

// ═══════════════════════════════════════════════════════════
// Criterion trait + engine
// ═══════════════════════════════════════════════════════════

/// One independently toggleable filter condition over a record type.
pub trait Criterion<R> {
    /// Whether the record satisfies this condition.
    fn matches(&self, record: &R) -> bool;

    /// Whether this condition constrains anything at all.
    fn is_active(&self) -> bool {
        true
    }
}

/// Keep the records matching every criterion, in record order.
pub fn apply<'a, R, C>(records: &'a [R], criteria: &[C]) -> Vec<&'a R>
where
    C: Criterion<R>,
{
    let active: Vec<&C> = criteria.iter().filter(|c| c.is_active()).collect();
    let kept: Vec<&R> = records
        .iter()
        .filter(|record| active.iter().all(|c| c.matches(record)))
        .collect();

    tracing::debug!(
        active_criteria = active.len(),
        records = records.len(),
        kept = kept.len(),
        "Filter recomputed"
    );
    kept
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ═══════════════════════════════════════════════════════════
// Doctor criteria
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum DoctorCriterion {
    /// Name, specialization or hospital name contains the text.
    Search(String),
    /// Hospital name contains the text.
    Location(String),
    Specialization(String),
    MinRating(f64),
    MaxFee(u32),
    AvailableOn(Weekday),
}

impl Criterion<Doctor> for DoctorCriterion {
    fn matches(&self, doctor: &Doctor) -> bool {
        match self {
            Self::Search(text) => {
                text.is_empty()
                    || contains_ignore_case(&doctor.name, text)
                    || contains_ignore_case(&doctor.specialization, text)
                    || contains_ignore_case(&doctor.hospital, text)
            }
            Self::Location(text) => text.is_empty() || contains_ignore_case(&doctor.hospital, text),
            Self::Specialization(spec) => spec.is_empty() || doctor.specialization == *spec,
            Self::MinRating(threshold) => doctor.rating >= *threshold,
            Self::MaxFee(limit) => doctor.consultation_fee <= *limit,
            Self::AvailableOn(day) => doctor.is_available_on(*day),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Search(text) | Self::Location(text) | Self::Specialization(text) => {
                !text.is_empty()
            }
            _ => true,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Hospital criteria
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum HospitalCriterion {
    /// Name or any specialization tag contains the text.
    Search(String),
    /// City or street address contains the text.
    Location(String),
    Specialization(String),
    MinRating(f64),
    HasAvailableBeds,
    /// Accepts at least one of the listed insurers.
    AcceptsAnyInsurance(Vec<String>),
}

impl Criterion<Hospital> for HospitalCriterion {
    fn matches(&self, hospital: &Hospital) -> bool {
        match self {
            Self::Search(text) => {
                text.is_empty()
                    || contains_ignore_case(&hospital.name, text)
                    || hospital
                        .specializations
                        .iter()
                        .any(|s| contains_ignore_case(s, text))
            }
            Self::Location(text) => {
                text.is_empty()
                    || contains_ignore_case(&hospital.city, text)
                    || contains_ignore_case(&hospital.location, text)
            }
            Self::Specialization(spec) => spec.is_empty() || hospital.offers(spec),
            Self::MinRating(threshold) => hospital.rating >= *threshold,
            Self::HasAvailableBeds => hospital.has_available_beds(),
            Self::AcceptsAnyInsurance(names) => {
                names.is_empty() || names.iter().any(|name| hospital.accepts(name))
            }
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Search(text) | Self::Location(text) | Self::Specialization(text) => {
                !text.is_empty()
            }
            Self::AcceptsAnyInsurance(names) => !names.is_empty(),
            _ => true,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Query-string forms
// ═══════════════════════════════════════════════════════════

/// Doctor list query parameters. Empty text and blank numbers are inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub min_rating: Option<String>,
    pub max_fee: Option<String>,
    pub availability: Option<String>,
}

impl DoctorQuery {
    pub fn criteria(&self) -> Result<Vec<DoctorCriterion>, FilterError> {
        let mut criteria = Vec::new();

        if let Some(text) = non_empty(&self.search) {
            criteria.push(DoctorCriterion::Search(text.to_string()));
        }
        if let Some(text) = non_empty(&self.location) {
            criteria.push(DoctorCriterion::Location(text.to_string()));
        }
        if let Some(spec) = non_blank(&self.specialization) {
            criteria.push(DoctorCriterion::Specialization(spec.to_string()));
        }
        if let Some(raw) = non_blank(&self.min_rating) {
            criteria.push(DoctorCriterion::MinRating(parse_rating(raw)?));
        }
        if let Some(raw) = non_blank(&self.max_fee) {
            let fee: f64 = raw.parse().map_err(|_| FilterError::InvalidNumber {
                field: "maxFee",
                value: raw.to_string(),
            })?;
            if !fee.is_finite() || fee < 0.0 {
                return Err(FilterError::InvalidNumber {
                    field: "maxFee",
                    value: raw.to_string(),
                });
            }
            // Fees are whole dollars, so "199.99" admits a 199 fee
            criteria.push(DoctorCriterion::MaxFee(fee.floor().min(f64::from(u32::MAX)) as u32));
        }
        if let Some(raw) = non_blank(&self.availability) {
            let day: Weekday = raw
                .parse()
                .map_err(|_| FilterError::InvalidDay(raw.to_string()))?;
            criteria.push(DoctorCriterion::AvailableOn(day));
        }

        Ok(criteria)
    }

    pub fn search<'a>(&self, doctors: &'a [Doctor]) -> Result<Vec<&'a Doctor>, FilterError> {
        Ok(apply(doctors, &self.criteria()?))
    }
}

/// Hospital list query parameters. Empty text and blank numbers are inactive.
/// `insurance` is a comma-separated list of insurer names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub min_rating: Option<String>,
    pub has_available_beds: Option<String>,
    pub insurance: Option<String>,
}

impl HospitalQuery {
    pub fn criteria(&self) -> Result<Vec<HospitalCriterion>, FilterError> {
        let mut criteria = Vec::new();

        if let Some(text) = non_empty(&self.search) {
            criteria.push(HospitalCriterion::Search(text.to_string()));
        }
        if let Some(text) = non_empty(&self.location) {
            criteria.push(HospitalCriterion::Location(text.to_string()));
        }
        if let Some(spec) = non_blank(&self.specialization) {
            criteria.push(HospitalCriterion::Specialization(spec.to_string()));
        }
        if let Some(raw) = non_blank(&self.min_rating) {
            criteria.push(HospitalCriterion::MinRating(parse_rating(raw)?));
        }
        if let Some(raw) = non_blank(&self.has_available_beds) {
            match raw {
                "true" => criteria.push(HospitalCriterion::HasAvailableBeds),
                "false" => {}
                _ => {
                    return Err(FilterError::InvalidFlag {
                        field: "hasAvailableBeds",
                        value: raw.to_string(),
                    })
                }
            }
        }
        let insurers = self.insurers();
        if !insurers.is_empty() {
            criteria.push(HospitalCriterion::AcceptsAnyInsurance(insurers));
        }

        Ok(criteria)
    }

    pub fn search<'a>(&self, hospitals: &'a [Hospital]) -> Result<Vec<&'a Hospital>, FilterError> {
        Ok(apply(hospitals, &self.criteria()?))
    }

    /// Selected insurers, trimmed, blanks dropped.
    pub fn insurers(&self) -> Vec<String> {
        self.insurance
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The search box state as it is written back to the address bar:
    /// only `search` and `location`, only when non-empty.
    pub fn address_bar(&self) -> String {
        let state = AddressBar {
            search: non_empty(&self.search),
            location: non_empty(&self.location),
        };
        // Two optional string fields always serialize
        serde_urlencoded::to_string(&state).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct AddressBar<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_rating(raw: &str) -> Result<f64, FilterError> {
    let rating: f64 = raw.parse().map_err(|_| FilterError::InvalidNumber {
        field: "minRating",
        value: raw.to_string(),
    })?;
    if rating.is_nan() {
        return Err(FilterError::InvalidNumber {
            field: "minRating",
            value: raw.to_string(),
        });
    }
    Ok(rating)
}
