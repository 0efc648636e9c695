//! Shared types for the API layer.

use std::sync::Arc;

use crate::core_state::CoreState;
use crate::notification::Notification;
use crate::session::Session;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// The caller's session, injected into request extensions by the
/// session middleware.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Bearer token that resolved to `session`. `None` for anonymous
    /// callers and for unknown tokens.
    pub token: Option<String>,
    pub session: Session,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            token: None,
            session: Session::anonymous(),
        }
    }
}

/// Body of commands whose only result is a toast.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NotificationResponse {
    pub notification: Notification,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self { notification }
    }
}
