//! Session management for the customer-facing surface.
//!
//! Sessions live in a concurrent map with explicit expiry: entries are
//! dropped on touch once expired and a background sweep evicts the
//! remainder, so abandoned sessions never accumulate.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use robomart_domain::order::UserId;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// Default session lifetime.
pub const SESSION_TIME_TO_LIVE: Duration = Duration::from_secs(24 * 60 * 60);

// =============================================================================
// SessionId
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(string)?))
    }
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// =============================================================================
// SessionStore
// =============================================================================

/// Concurrent session map with per-entry expiry.
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
    time_to_live: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(time_to_live: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            time_to_live,
        }
    }

    /// Issues a fresh session for the user.
    #[must_use]
    pub fn create(&self, user_id: UserId) -> (SessionId, DateTime<Utc>) {
        let session_id = SessionId::generate();
        let expires_at = Utc::now() + self.time_to_live;
        self.sessions.insert(
            session_id,
            Session {
                user_id,
                expires_at,
            },
        );
        (session_id, expires_at)
    }

    /// Returns the live session, removing it when expired.
    #[must_use]
    pub fn resolve(&self, session_id: &SessionId) -> Option<Session> {
        let session = *self.sessions.get(session_id)?;
        if session.is_expired(Utc::now()) {
            self.sessions.remove(session_id);
            return None;
        }
        Some(session)
    }

    pub fn remove(&self, session_id: &SessionId) {
        self.sessions.remove(session_id);
    }

    /// Drops every expired session.
    pub fn evict_expired(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, session| !session.is_expired(now));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Starts the periodic eviction sweep.
    pub fn spawn_eviction(self: &Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                store.evict_expired();
            }
        })
    }
}

// =============================================================================
// Cookie Helpers
// =============================================================================

/// Extracts the session id from a `Cookie` header value.
#[must_use]
pub fn parse_session_cookie(cookie_header: &str) -> Option<SessionId> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// `Set-Cookie` value establishing the session.
#[must_use]
pub fn session_cookie(session_id: SessionId, time_to_live: Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        session_id,
        time_to_live.as_secs()
    )
}

/// `Set-Cookie` value clearing the session.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

// =============================================================================
// Password Digests
// =============================================================================

/// Hex-encoded SHA-256 digest used for stored passwords.
#[must_use]
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compares a candidate password against a stored digest.
#[must_use]
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    password_digest(password) == stored_digest.to_lowercase()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user() -> UserId {
        UserId::new(1).unwrap()
    }

    mod session_store {
        use super::*;

        #[rstest]
        fn created_sessions_resolve() {
            let store = SessionStore::new(SESSION_TIME_TO_LIVE);
            let (session_id, _) = store.create(user());

            let session = store.resolve(&session_id).unwrap();

            assert_eq!(session.user_id, user());
        }

        #[rstest]
        fn unknown_sessions_do_not_resolve() {
            let store = SessionStore::new(SESSION_TIME_TO_LIVE);

            assert!(store.resolve(&SessionId::generate()).is_none());
        }

        #[rstest]
        fn expired_sessions_are_dropped_on_touch() {
            let store = SessionStore::new(Duration::ZERO);
            let (session_id, _) = store.create(user());

            assert!(store.resolve(&session_id).is_none());
            assert!(store.is_empty());
        }

        #[rstest]
        fn remove_invalidates_the_session() {
            let store = SessionStore::new(SESSION_TIME_TO_LIVE);
            let (session_id, _) = store.create(user());

            store.remove(&session_id);

            assert!(store.resolve(&session_id).is_none());
        }

        #[rstest]
        fn eviction_sweep_keeps_live_sessions() {
            let live = SessionStore::new(SESSION_TIME_TO_LIVE);
            let (live_id, _) = live.create(user());
            let stale_id = SessionId::generate();
            live.sessions.insert(
                stale_id,
                Session {
                    user_id: user(),
                    expires_at: Utc::now() - Duration::from_secs(1),
                },
            );

            live.evict_expired();

            assert!(live.resolve(&live_id).is_some());
            assert!(live.resolve(&stale_id).is_none());
            assert_eq!(live.len(), 1);
        }
    }

    mod cookies {
        use super::*;

        #[rstest]
        fn parses_the_session_cookie_among_others() {
            let session_id = SessionId::generate();
            let header = format!("theme=dark; session_id={}; lang=en", session_id);

            assert_eq!(parse_session_cookie(&header), Some(session_id));
        }

        #[rstest]
        fn missing_cookie_parses_to_none() {
            assert_eq!(parse_session_cookie("theme=dark"), None);
        }

        #[rstest]
        fn malformed_session_id_parses_to_none() {
            assert_eq!(parse_session_cookie("session_id=not-a-uuid"), None);
        }

        #[rstest]
        fn session_cookie_is_http_only() {
            let value = session_cookie(SessionId::generate(), Duration::from_secs(60));

            assert!(value.contains("HttpOnly"));
            assert!(value.contains("Max-Age=60"));
        }

        #[rstest]
        fn clear_cookie_expires_immediately() {
            assert!(clear_session_cookie().contains("Max-Age=0"));
        }
    }

    mod passwords {
        use super::*;

        #[rstest]
        fn digest_is_deterministic_hex() {
            let digest = password_digest("password");

            assert_eq!(digest.len(), 64);
            assert_eq!(digest, password_digest("password"));
        }

        #[rstest]
        fn verify_accepts_the_right_password() {
            let stored = password_digest("hunter2");

            assert!(verify_password("hunter2", &stored));
            assert!(!verify_password("hunter3", &stored));
        }
    }
}
