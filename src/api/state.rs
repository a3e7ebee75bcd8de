//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::api::cookies;
use crate::auth::{Session, SessionStore, UserStore};
use crate::index::FormIndex;
use crate::storage::{FormFileStore, TemplateLibrary};
use axum::http::HeaderMap;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Stored forms and their inverted index
    pub index: Arc<FormIndex>,
    /// Rendered form files on disk
    pub files: Arc<FormFileStore>,
    /// Imported HTML templates
    pub templates: Arc<TemplateLibrary>,
    /// Registered users
    pub users: Arc<UserStore>,
    /// Login and guest sessions
    pub sessions: Arc<SessionStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with empty user and session stores
    pub fn new(
        index: Arc<FormIndex>,
        files: FormFileStore,
        templates: Arc<TemplateLibrary>,
        config: ApiConfig,
    ) -> Self {
        let sessions = SessionStore::new(config.session_ttl());

        Self {
            index,
            files: Arc::new(files),
            templates,
            users: Arc::new(UserStore::new()),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Live session named by the request's `sid` cookie
    pub fn current_session(&self, headers: &HeaderMap) -> Option<(String, Session)> {
        let sid = cookies::session_id(headers)?;
        let session = self.sessions.lookup(&sid)?;
        Some((sid, session))
    }

    /// Logged-in user for the request; guests and anonymous requests get `None`
    pub fn current_user(&self, headers: &HeaderMap) -> Option<String> {
        self.current_session(headers)
            .and_then(|(_, session)| session.username)
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum template upload size in bytes
    pub max_upload_bytes: usize,
    /// Session and cookie lifetime in seconds
    pub session_ttl_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
            session_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session lifetime as a chrono duration
    pub fn session_ttl(&self) -> chrono::Duration {
        let secs = i64::try_from(self.session_ttl_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        chrono::Duration::seconds(secs)
    }
}
