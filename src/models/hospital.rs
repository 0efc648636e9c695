use serde::{Deserialize, Serialize};

use super::review::Review;

/// Service prices in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub consultation: u32,
    pub emergency: u32,
    pub surgery: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    /// Street address.
    pub location: String,
    pub city: String,
    pub specializations: Vec<String>,
    pub rating: f64,
    pub total_beds: u32,
    pub available_beds: u32,
    pub image: Option<String>,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub description: String,
    pub accepted_insurance: Vec<String>,
    pub pricing: Pricing,
    pub reviews: Vec<Review>,
}

impl Hospital {
    pub fn has_available_beds(&self) -> bool {
        self.available_beds > 0
    }

    pub fn accepts(&self, insurance: &str) -> bool {
        self.accepted_insurance.iter().any(|i| i == insurance)
    }

    pub fn offers(&self, specialization: &str) -> bool {
        self.specializations.iter().any(|s| s == specialization)
    }

    /// Mean review rating, `None` without reviews.
    pub fn average_review_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(sum) / self.reviews.len() as f64)
    }
}
