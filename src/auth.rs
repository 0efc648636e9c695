//! Identity provider seam.
//!
//! Everything that needs a user goes through the `Authenticator` trait.
//! `DemoAuthenticator` is the stand-in shipped with the demo: it accepts
//! any credentials and derives the role from the email address. A real
//! identity backend replaces it in `CoreState` without touching callers.

use serde::{Deserialize, Serialize};

use crate::models::{Role, SessionUser};

/// Display name given to demo hospital accounts.
pub const DEMO_HOSPITAL_NAME: &str = "City Hospital";
/// Display name given to demo patient accounts.
pub const DEMO_PATIENT_NAME: &str = "John Doe";
/// User id shared by every demo login.
pub const DEMO_USER_ID: &str = "1";

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A validated sign-up request (see `forms::RegisterForm`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("The {0} role cannot be chosen at sign-up")]
    RoleNotSelfAssignable(Role),
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

// ═══════════════════════════════════════════════════════════
// Authenticator
// ═══════════════════════════════════════════════════════════

pub trait Authenticator: Send + Sync {
    /// Resolve credentials to a user.
    fn authenticate(&self, credentials: &Credentials) -> Result<SessionUser, AuthError>;

    /// Create an account and return its user.
    fn register(&self, registration: &Registration) -> Result<SessionUser, AuthError>;
}

/// Accepts every login. An email containing `"hospital"` (case-sensitive)
/// becomes a hospital account, anything else a patient account. The
/// password is never looked at.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAuthenticator;

impl Authenticator for DemoAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<SessionUser, AuthError> {
        let (role, name) = if credentials.email.contains("hospital") {
            (Role::Hospital, DEMO_HOSPITAL_NAME)
        } else {
            (Role::Patient, DEMO_PATIENT_NAME)
        };

        Ok(SessionUser {
            id: DEMO_USER_ID.to_string(),
            email: credentials.email.clone(),
            name: name.to_string(),
            role,
        })
    }

    fn register(&self, registration: &Registration) -> Result<SessionUser, AuthError> {
        if registration.role == Role::Admin {
            return Err(AuthError::RoleNotSelfAssignable(Role::Admin));
        }

        Ok(SessionUser {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            email: registration.email.clone(),
            name: registration.name.clone(),
            role: registration.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn hospital_email_yields_hospital_role() {
        let user = DemoAuthenticator
            .authenticate(&creds("hospital@demo.com", "whatever"))
            .unwrap();
        assert_eq!(user.role, Role::Hospital);
        assert_eq!(user.name, DEMO_HOSPITAL_NAME);
        assert_eq!(user.email, "hospital@demo.com");
    }

    #[test]
    fn other_email_yields_patient_role_for_any_password() {
        for password in ["", "x", "correct horse battery staple"] {
            let user = DemoAuthenticator
                .authenticate(&creds("patient@demo.com", password))
                .unwrap();
            assert_eq!(user.role, Role::Patient);
            assert_eq!(user.name, DEMO_PATIENT_NAME);
            assert_eq!(user.id, DEMO_USER_ID);
        }
    }

    #[test]
    fn hospital_match_is_case_sensitive() {
        let user = DemoAuthenticator
            .authenticate(&creds("admin@HOSPITAL.org", "pw"))
            .unwrap();
        assert_eq!(user.role, Role::Patient);
    }

    #[test]
    fn register_keeps_supplied_role_and_name() {
        let user = DemoAuthenticator
            .register(&Registration {
                email: "metro@care.org".into(),
                password: "secret1".into(),
                name: "Metro Health Institute".into(),
                role: Role::Hospital,
            })
            .unwrap();
        assert_eq!(user.role, Role::Hospital);
        assert_eq!(user.name, "Metro Health Institute");
        assert!(user.id.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn register_refuses_admin() {
        let err = DemoAuthenticator
            .register(&Registration {
                email: "root@demo.com".into(),
                password: "secret1".into(),
                name: "Root".into(),
                role: Role::Admin,
            })
            .unwrap_err();
        assert_eq!(err, AuthError::RoleNotSelfAssignable(Role::Admin));
    }
}
