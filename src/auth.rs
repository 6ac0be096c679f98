//! Admin login and server-side sessions.
//!
//! There is a single configured admin account. A successful login issues an
//! opaque session token; the HTTP layer keeps it in a cookie and resolves it
//! back to a [`Session`] on every protected request. Sessions expire
//! [`SESSION_TTL`] after login.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The configured admin username and password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns true if the supplied pair matches after trimming whitespace.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        username.trim() == self.username && password.trim() == self.password
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "Salary26?")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How long a session stays open after login.
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// An authenticated session, passed to request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The session token.
    pub token: Uuid,
    /// The user the session belongs to.
    pub username: String,
}

#[derive(Debug)]
struct OpenSession {
    username: String,
    issued_at: Instant,
}

/// Issues, resolves and revokes session tokens.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, OpenSession>>>,
}

impl Authenticator {
    /// Creates an authenticator for the given admin account.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ttl: SESSION_TTL,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Sets how long sessions stay open after login.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Checks the supplied credentials and opens a session if they match.
    pub fn login(&self, username: &str, password: &str) -> Option<Session> {
        if !self.credentials.matches(username, password) {
            warn!(username = %username.trim(), "Rejected login");
            return None;
        }

        let token = Uuid::new_v4();
        let username = username.trim().to_string();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = sessions.len();
        sessions.retain(|_, open| open.issued_at.elapsed() < self.ttl);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "Pruned expired sessions");
        }
        sessions.insert(
            token,
            OpenSession {
                username: username.clone(),
                issued_at: Instant::now(),
            },
        );
        drop(sessions);

        info!(username = %username, "Logged in");
        Some(Session { token, username })
    }

    /// Resolves a token to its session, if it is still open.
    ///
    /// An expired session is removed.
    pub fn session(&self, token: Uuid) -> Option<Session> {
        {
            let sessions = self
                .sessions
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let open = sessions.get(&token)?;
            if open.issued_at.elapsed() < self.ttl {
                return Some(Session {
                    token,
                    username: open.username.clone(),
                });
            }
        }

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(open) = sessions.get(&token) {
            if open.issued_at.elapsed() >= self.ttl {
                debug!(username = %open.username, "Session expired");
                sessions.remove(&token);
            }
        }
        None
    }

    /// Closes a session. Returns false if it was not open.
    pub fn logout(&self, token: Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&token);

        if let Some(open) = &removed {
            info!(username = %open.username, "Logged out");
        }
        removed.is_some()
    }
}
