use serde::{Deserialize, Serialize};

use super::enums::Role;

/// The identity held by a session after login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
