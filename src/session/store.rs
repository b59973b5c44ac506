// src/session/store.rs
use crate::domain::Session;
use crate::errors::ServerError;
use crate::session::token::{generate_token_default, hash_token};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

pub const SESSION_COOKIE: &str = "landcalc_session";

/// Sessions idle for longer than this are dropped.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: DateTime<Utc>,
}

/// In-memory sessions, one per browser. Nothing is written to disk; the
/// store is emptied when the process exits, and idle sessions expire.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<[u8; 32], Entry>>,
    ttl: Duration,
}

/// The session a request works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub token: String,
    /// The browser has no cookie for this token yet.
    pub is_new: bool,
}

impl SessionHandle {
    pub fn set_cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.token,
            SESSION_TTL_DAYS * 24 * 60 * 60
        )
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::days(SESSION_TTL_DAYS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Resume the session behind a presented cookie token, or start a new
    /// one when the token is missing, unknown or expired.
    pub fn begin(&self, presented: Option<&str>) -> Result<SessionHandle, ServerError> {
        self.begin_at(presented, Utc::now())
    }

    pub fn begin_at(
        &self,
        presented: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<SessionHandle, ServerError> {
        let mut sessions = self.lock()?;

        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, e| now - e.last_seen <= ttl);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "sessions expired");
        }

        if let Some(token) = presented {
            if let Some(entry) = sessions.get_mut(&hash_token(token)) {
                entry.last_seen = now;
                return Ok(SessionHandle {
                    token: token.to_string(),
                    is_new: false,
                });
            }
        }

        let token = generate_token_default();
        sessions.insert(
            hash_token(&token),
            Entry {
                session: Session::default(),
                last_seen: now,
            },
        );
        debug!(sessions = sessions.len(), "session started");
        Ok(SessionHandle {
            token,
            is_new: true,
        })
    }

    /// Read-modify-write one session under the lock.
    pub fn with_session<T>(
        &self,
        handle: &SessionHandle,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, ServerError> {
        let mut sessions = self.lock()?;
        let entry = sessions
            .get_mut(&hash_token(&handle.token))
            .ok_or_else(|| ServerError::BadRequest("session expired".into()))?;
        Ok(f(&mut entry.session))
    }

    /// A copy of the session, for rendering.
    pub fn snapshot(&self, handle: &SessionHandle) -> Result<Session, ServerError> {
        self.with_session(handle, |s| s.clone())
    }

    pub fn len(&self) -> Result<usize, ServerError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<[u8; 32], Entry>>, ServerError> {
        self.sessions
            .lock()
            .map_err(|_| ServerError::Internal("session store lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_missing_token_starts_a_new_session() {
        let store = SessionStore::new();
        let first = store.begin(None).unwrap();
        assert!(first.is_new);

        let again = store.begin(Some(&first.token)).unwrap();
        assert_eq!(again.token, first.token);
        assert!(!again.is_new);

        let stranger = store.begin(Some("not-a-session")).unwrap();
        assert!(stranger.is_new);
        assert_ne!(stranger.token, "not-a-session");
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.begin(None).unwrap();
        let b = store.begin(None).unwrap();

        store
            .with_session(&a, |s| s.subject.address = Some("1 A St".into()))
            .unwrap();

        assert_eq!(
            store.snapshot(&a).unwrap().subject.address.as_deref(),
            Some("1 A St")
        );
        assert!(store.snapshot(&b).unwrap().subject.is_blank());
    }

    #[test]
    fn cookie_carries_the_token() {
        let handle = SessionHandle {
            token: "abc".into(),
            is_new: true,
        };
        assert!(handle.set_cookie().starts_with("landcalc_session=abc;"));
    }

    #[test]
    fn idle_sessions_expire() {
        let store = SessionStore::new();
        let start = Utc::now();
        let old = store.begin_at(None, start).unwrap();

        let later = start + Duration::days(SESSION_TTL_DAYS) + Duration::minutes(1);
        let resumed = store.begin_at(Some(&old.token), later).unwrap();

        assert!(resumed.is_new);
        assert_ne!(resumed.token, old.token);
        assert_eq!(store.len().unwrap(), 1);
        assert!(matches!(store.snapshot(&old), Err(ServerError::BadRequest(_))));
    }

    #[test]
    fn activity_keeps_a_session_alive() {
        let store = SessionStore::new();
        let start = Utc::now();
        let handle = store.begin_at(None, start).unwrap();

        let mid = start + Duration::days(SESSION_TTL_DAYS - 1);
        assert!(!store.begin_at(Some(&handle.token), mid).unwrap().is_new);

        let after_first_ttl = start + Duration::days(SESSION_TTL_DAYS + 1);
        assert!(!store.begin_at(Some(&handle.token), after_first_ttl).unwrap().is_new);
    }

    #[test]
    fn cookieless_requests_do_not_accumulate_past_the_ttl() {
        let store = SessionStore::with_ttl(Duration::minutes(30));
        let start = Utc::now();
        for i in 0..100 {
            store.begin_at(None, start + Duration::seconds(i)).unwrap();
        }
        assert_eq!(store.len().unwrap(), 100);

        store.begin_at(None, start + Duration::hours(1)).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }
}
