//! In-memory login sessions.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Opaque session token handed to the browser as a cookie value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

#[derive(Debug, Clone)]
struct Session {
    expires_at: DateTime<Utc>,
}

/// Active login sessions, keyed by token.
///
/// Tokens expire after the configured lifetime; expired entries are dropped
/// when they are next seen. State is process-local: restarting the server
/// logs everyone out.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for a successful login.
    pub fn issue(&self) -> SessionToken {
        let token = SessionToken::new();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(
                token,
                Session {
                    expires_at: Utc::now() + self.ttl,
                },
            );
        }
        token
    }

    /// Whether the token belongs to a live session.
    pub fn is_active(&self, token: SessionToken) -> bool {
        let now = Utc::now();
        {
            let Ok(sessions) = self.sessions.read() else {
                return false;
            };
            match sessions.get(&token) {
                Some(session) if session.expires_at > now => return true,
                Some(_) => {} // expired; drop it below
                None => return false,
            }
        }
        self.revoke(token);
        false
    }

    /// Drop the session, if present.
    pub fn revoke(&self, token: SessionToken) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(&token);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_are_active_until_revoked() {
        let store = SessionStore::default();
        let token = store.issue();

        assert!(store.is_active(token));
        store.revoke(token);
        assert!(!store.is_active(token));
    }

    #[test]
    fn unknown_tokens_are_not_active() {
        let store = SessionStore::default();
        assert!(!store.is_active(SessionToken::new()));
    }

    #[test]
    fn expired_tokens_are_dropped_on_access() {
        let store = SessionStore::new(Duration::seconds(-1));
        let token = store.issue();

        assert!(!store.is_active(token));
        // Second lookup hits the already-cleaned map.
        assert!(!store.is_active(token));
    }

    #[test]
    fn tokens_round_trip_through_their_cookie_form() {
        let store = SessionStore::default();
        let token = store.issue();

        let parsed: SessionToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert!(store.is_active(parsed));
    }
}
