//! Session Store - cookie session ids mapped to users
//!
//! Session ids are `<unix-nanos>-<counter>`. Guests (the `bypass=1` path)
//! get a session without a username. Sessions expire after the configured
//! TTL, matching the cookie lifetime.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One login (or guest) session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// `None` for guests
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_guest(&self) -> bool {
        self.username.is_none()
    }
}

/// Live sessions keyed by session id
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    counter: AtomicU64,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            counter: AtomicU64::new(1),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session and return its id
    pub fn create(&self, username: Option<String>) -> String {
        let now = Utc::now();
        let nanos = now.timestamp_nanos_opt().unwrap_or_default();
        let sid = format!("{}-{}", nanos, self.counter.fetch_add(1, Ordering::Relaxed));

        self.sessions.write().insert(
            sid.clone(),
            Session {
                username,
                created_at: now,
            },
        );
        sid
    }

    /// Live session for `sid`; expired sessions are dropped on sight
    pub fn lookup(&self, sid: &str) -> Option<Session> {
        let session = self.sessions.read().get(sid).cloned()?;

        if self.is_expired(&session, Utc::now()) {
            self.sessions.write().remove(sid);
            tracing::debug!(sid = %sid, "Session expired");
            return None;
        }
        Some(session)
    }

    /// Username behind `sid`, `None` for guests and unknown sessions
    pub fn username(&self, sid: &str) -> Option<String> {
        self.lookup(sid).and_then(|s| s.username)
    }

    /// End a session; returns whether it existed
    pub fn remove(&self, sid: &str) -> bool {
        self.sessions.write().remove(sid).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| now - session.created_at < self.ttl);
        before - sessions.len()
    }

    /// Spawn a task that prunes expired sessions every `every`
    pub fn start_pruning(self: Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let pruned = self.prune_expired();
                if pruned > 0 {
                    tracing::debug!(pruned, remaining = self.len(), "Pruned expired sessions");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.created_at >= self.ttl
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}
