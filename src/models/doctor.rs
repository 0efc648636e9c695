use serde::{Deserialize, Serialize};

use super::enums::Weekday;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    /// Denormalized hospital name; must agree with `hospital_id`.
    pub hospital: String,
    pub hospital_id: String,
    /// Years of practice.
    pub experience: u32,
    pub rating: f64,
    pub consultation_fee: u32,
    pub image: Option<String>,
    pub availability: Vec<Weekday>,
    pub education: String,
    pub languages: Vec<String>,
    pub description: String,
}

impl Doctor {
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }
}
