//! Server-side session table.
//!
//! Maps opaque bearer tokens to `Session` values so each client keeps its
//! own login for as long as it keeps the token. Key properties:
//! - Tokens exist only in memory; a restart logs everyone out
//! - Only the SHA-256 of a token is stored
//! - Sessions idle past the configured timeout are evicted

use std::collections::HashMap;
use std::time::{Duration, Instant};

use base64::Engine;
use sha2::{Digest, Sha256};

use crate::session::Session;

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

// ═══════════════════════════════════════════════════════════
// StoredSession
// ═══════════════════════════════════════════════════════════

struct StoredSession {
    session: Session,
    last_seen: Instant,
}

// ═══════════════════════════════════════════════════════════
// SessionStore
// ═══════════════════════════════════════════════════════════

pub struct SessionStore {
    sessions: HashMap<[u8; 32], StoredSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Store a session under a fresh token and return the token.
    pub fn open(&mut self, session: Session) -> String {
        let token = generate_token();
        self.sessions.insert(
            hash_token(&token),
            StoredSession {
                session,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Look up a session and mark it as used.
    pub fn touch(&mut self, token: &str) -> Option<Session> {
        let stored = self.sessions.get_mut(&hash_token(token))?;
        stored.last_seen = Instant::now();
        Some(stored.session.clone())
    }

    /// Look up a session without refreshing its idle clock.
    pub fn peek(&self, token: &str) -> Option<&Session> {
        self.sessions.get(&hash_token(token)).map(|s| &s.session)
    }

    /// Replace the session behind a token. Returns false for unknown tokens.
    pub fn replace(&mut self, token: &str, session: Session) -> bool {
        match self.sessions.get_mut(&hash_token(token)) {
            Some(stored) => {
                stored.session = session;
                stored.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Forget a token. Returns whether it was known.
    pub fn close(&mut self, token: &str) -> bool {
        self.sessions.remove(&hash_token(token)).is_some()
    }

    /// Drop sessions idle for longer than `timeout`. Returns how many.
    pub fn evict_idle(&mut self, timeout: Duration) -> usize {
        self.evict_idle_at(Instant::now(), timeout)
    }

    pub(crate) fn evict_idle_at(&mut self, now: Instant, timeout: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| now.saturating_duration_since(stored.last_seen) <= timeout);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "Idle sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
