//! Shared application state.
//!
//! `CoreState` is built once at startup and shared behind an `Arc` by every
//! request handler. The catalog is read-only; the session table is the only
//! mutable part and sits behind an `RwLock`.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::{Authenticator, DemoAuthenticator};
use crate::catalog::{Catalog, CatalogError};
use crate::config::AppConfig;
use crate::session::Session;
use crate::session_store::SessionStore;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    catalog: Catalog,
    /// Identity provider. The demo build injects `DemoAuthenticator`.
    authenticator: Arc<dyn Authenticator>,
    sessions: RwLock<SessionStore>,
    pub config: AppConfig,
}

impl CoreState {
    /// Seeded catalog with the demo identity provider.
    pub fn new(config: AppConfig) -> Result<Self, CoreError> {
        Ok(Self::with_parts(
            Catalog::seeded()?,
            Arc::new(DemoAuthenticator),
            config,
        ))
    }

    pub fn with_parts(
        catalog: Catalog,
        authenticator: Arc<dyn Authenticator>,
        config: AppConfig,
    ) -> Self {
        Self {
            catalog,
            authenticator,
            sessions: RwLock::new(SessionStore::new()),
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    // ── Session table ───────────────────────────────────────

    pub fn read_sessions(&self) -> Result<RwLockReadGuard<'_, SessionStore>, CoreError> {
        self.sessions.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_sessions(&self) -> Result<RwLockWriteGuard<'_, SessionStore>, CoreError> {
        self.sessions.write().map_err(|_| CoreError::LockPoisoned)
    }

    /// Store a session and hand back its bearer token.
    pub fn open_session(&self, session: Session) -> Result<String, CoreError> {
        Ok(self.write_sessions()?.open(session))
    }

    /// Resolve a bearer token, refreshing its idle clock.
    pub fn session_for(&self, token: &str) -> Result<Option<Session>, CoreError> {
        Ok(self.write_sessions()?.touch(token))
    }

    pub fn replace_session(&self, token: &str, session: Session) -> Result<bool, CoreError> {
        Ok(self.write_sessions()?.replace(token, session))
    }

    pub fn close_session(&self, token: &str) -> Result<bool, CoreError> {
        Ok(self.write_sessions()?.close(token))
    }

    /// Drop sessions idle past `config.session_idle_timeout`.
    pub fn evict_idle_sessions(&self) -> Result<usize, CoreError> {
        let timeout = self.config.session_idle_timeout;
        Ok(self.write_sessions()?.evict_idle(timeout))
    }

    pub fn session_count(&self) -> usize {
        self.read_sessions().map(|s| s.len()).unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════
// Error
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Catalog rejected: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    fn core() -> CoreState {
        CoreState::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn new_state_is_seeded_with_no_sessions() {
        let state = core();
        assert_eq!(state.catalog().hospitals().len(), 3);
        assert_eq!(state.catalog().doctors().len(), 3);
        assert_eq!(state.session_count(), 0);
    }

    #[test]
    fn session_lifecycle_through_state() {
        let state = core();
        let mut session = Session::anonymous();
        session
            .login(
                state.authenticator(),
                &Credentials {
                    email: "hospital@demo.com".into(),
                    password: "secret".into(),
                },
            )
            .unwrap();

        let token = state.open_session(session).unwrap();
        assert_eq!(state.session_count(), 1);
        let resolved = state.session_for(&token).unwrap().unwrap();
        assert_eq!(resolved.user().unwrap().name, "City Hospital");

        assert!(state.replace_session(&token, Session::anonymous()).unwrap());
        assert!(!state.session_for(&token).unwrap().unwrap().is_authenticated());

        assert!(state.close_session(&token).unwrap());
        assert!(state.session_for(&token).unwrap().is_none());
    }

    #[test]
    fn eviction_uses_configured_timeout() {
        let state = core();
        state.open_session(Session::anonymous()).unwrap();
        // Default timeout is 30 minutes, nothing is that old yet
        assert_eq!(state.evict_idle_sessions().unwrap(), 0);
        assert_eq!(state.session_count(), 1);
    }
}
