//! Sign-up form validation.
//!
//! Failures are reported as a single notification, never as per-field
//! errors, and the form is not submitted.

use serde::{Deserialize, Serialize};

use crate::auth::Registration;
use crate::models::Role;
use crate::notification::Notification;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

impl FormError {
    pub fn to_notification(&self) -> Notification {
        match self {
            Self::PasswordMismatch => Notification::destructive(
                "Password Mismatch",
                "Passwords do not match. Please try again.",
            ),
            Self::PasswordTooShort { min } => Notification::destructive(
                "Password Too Short",
                format!("Password must be at least {min} characters long."),
            ),
        }
    }
}

/// Sign-up form as submitted. `name` is the person's full name for
/// patients and the hospital name for hospital accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Patient
}

impl RegisterForm {
    /// Mismatch is checked before length, so a short mismatched pair
    /// reports the mismatch.
    pub fn validate(&self) -> Result<Registration, FormError> {
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        // Length in UTF-16 code units, as the browser form counts it
        if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Registration {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            role: self.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            email: "new@demo.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            name: "Jane Roe".into(),
            role: Role::Patient,
        }
    }

    #[test]
    fn valid_form_becomes_registration() {
        let registration = form("secret1", "secret1").validate().unwrap();
        assert_eq!(registration.name, "Jane Roe");
        assert_eq!(registration.role, Role::Patient);
    }

    #[test]
    fn mismatch_reported_before_length() {
        assert_eq!(form("abc", "abd").validate().unwrap_err(), FormError::PasswordMismatch);
    }

    #[test]
    fn short_password_rejected() {
        let err = form("abc12", "abc12").validate().unwrap_err();
        assert_eq!(err, FormError::PasswordTooShort { min: 6 });
        let note = err.to_notification();
        assert_eq!(note.title, "Password Too Short");
        assert!(note.is_destructive());
    }

    #[test]
    fn length_counts_utf16_units() {
        // Each of these takes two UTF-16 units
        let astral = "\u{1F600}\u{1F601}\u{1F602}";
        assert!(form(astral, astral).validate().is_ok());
        let bmp = "ééééé";
        assert_eq!(
            form(bmp, bmp).validate().unwrap_err(),
            FormError::PasswordTooShort { min: 6 }
        );
    }

    #[test]
    fn role_defaults_to_patient_when_omitted() {
        let form: RegisterForm = serde_json::from_str(
            r#"{"email":"a@b.c","password":"secret1","confirmPassword":"secret1","name":"A"}"#,
        )
        .unwrap();
        assert_eq!(form.role, Role::Patient);
    }
}
