use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub patient_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub date: String,
}
