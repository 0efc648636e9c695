//! Session gate.
//!
//! A `Session` is a plain value owned by whoever drives the UI (or, on the
//! server, by the `SessionStore` entry for a bearer token). It starts
//! anonymous, becomes authenticated through an `Authenticator`, and goes
//! back to anonymous on logout. Protected views ask it for an `Access`
//! decision instead of raising errors.

use serde::Serialize;

use crate::auth::{AuthError, Authenticator, Credentials, Registration};
use crate::models::{Role, SessionUser};

// ═══════════════════════════════════════════════════════════
// Access decisions
// ═══════════════════════════════════════════════════════════

/// Why a protected view was not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "role", rename_all = "snake_case")]
pub enum Restriction {
    /// No user is logged in.
    LoginRequired,
    /// A user is logged in but holds a different role.
    RoleRequired(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<'a> {
    Granted(&'a SessionUser),
    Restricted(Restriction),
}

impl Access<'_> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Log in through the authenticator. On failure the session keeps
    /// whatever user it had.
    pub fn login(
        &mut self,
        authenticator: &dyn Authenticator,
        credentials: &Credentials,
    ) -> Result<&SessionUser, AuthError> {
        let user = authenticator.authenticate(credentials)?;
        tracing::info!(user_id = %user.id, role = %user.role, "Session logged in");
        Ok(self.user.insert(user))
    }

    /// Register and log in as the new account.
    pub fn register(
        &mut self,
        authenticator: &dyn Authenticator,
        registration: &Registration,
    ) -> Result<&SessionUser, AuthError> {
        let user = authenticator.register(registration)?;
        tracing::info!(user_id = %user.id, role = %user.role, "Account registered");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "Session logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Any logged-in user.
    pub fn require_login(&self) -> Access<'_> {
        match &self.user {
            Some(user) => Access::Granted(user),
            None => Access::Restricted(Restriction::LoginRequired),
        }
    }

    /// A logged-in user holding exactly `required`.
    pub fn authorize(&self, required: Role) -> Access<'_> {
        match &self.user {
            Some(user) if user.has_role(required) => Access::Granted(user),
            Some(_) => Access::Restricted(Restriction::RoleRequired(required)),
            None => Access::Restricted(Restriction::LoginRequired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DemoAuthenticator;

    struct RejectAll;

    impl Authenticator for RejectAll {
        fn authenticate(&self, _: &Credentials) -> Result<SessionUser, AuthError> {
            Err(AuthError::InvalidCredentials)
        }

        fn register(&self, _: &Registration) -> Result<SessionUser, AuthError> {
            Err(AuthError::Unavailable("closed".into()))
        }
    }

    fn creds(email: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: String::new(),
        }
    }

    #[test]
    fn starts_anonymous() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(
            session.authorize(Role::Hospital),
            Access::Restricted(Restriction::LoginRequired)
        );
    }

    #[test]
    fn hospital_login_unlocks_hospital_views_only() {
        let mut session = Session::anonymous();
        session.login(&DemoAuthenticator, &creds("hospital@demo.com")).unwrap();
        assert!(session.authorize(Role::Hospital).is_granted());
        assert_eq!(
            session.authorize(Role::Admin),
            Access::Restricted(Restriction::RoleRequired(Role::Admin))
        );
    }

    #[test]
    fn patient_is_refused_hospital_role() {
        let mut session = Session::anonymous();
        session.login(&DemoAuthenticator, &creds("patient@demo.com")).unwrap();
        assert!(session.require_login().is_granted());
        assert_eq!(
            session.authorize(Role::Hospital),
            Access::Restricted(Restriction::RoleRequired(Role::Hospital))
        );
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let mut session = Session::anonymous();
        session.login(&DemoAuthenticator, &creds("patient@demo.com")).unwrap();
        session.logout();
        assert_eq!(session, Session::anonymous());
        // Logging out twice is harmless
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn failed_login_keeps_previous_user() {
        let mut session = Session::anonymous();
        session.login(&DemoAuthenticator, &creds("patient@demo.com")).unwrap();
        let err = session.login(&RejectAll, &creds("hospital@demo.com")).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(session.user().unwrap().role, Role::Patient);
    }

    #[test]
    fn register_logs_in_as_new_account() {
        let mut session = Session::anonymous();
        let user = session
            .register(
                &DemoAuthenticator,
                &Registration {
                    email: "care@stmary.org".into(),
                    password: "secret1".into(),
                    name: "St. Mary Medical Center".into(),
                    role: Role::Hospital,
                },
            )
            .unwrap()
            .clone();
        assert_eq!(session.user(), Some(&user));
        assert!(session.authorize(Role::Hospital).is_granted());
    }

    #[test]
    fn restriction_serializes_with_reason_tag() {
        let json = serde_json::to_value(Restriction::RoleRequired(Role::Hospital)).unwrap();
        assert_eq!(json["reason"], "role_required");
        assert_eq!(json["role"], "hospital");
        let json = serde_json::to_value(Restriction::LoginRequired).unwrap();
        assert_eq!(json["reason"], "login_required");
    }
}
