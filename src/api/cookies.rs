//! Session cookie helpers
//!
//! The session id travels in a single `sid` cookie: `HttpOnly`,
//! `SameSite=Lax`, scoped to `/`.

use axum::http::{header, HeaderMap};

pub const SESSION_COOKIE: &str = "sid";

/// Session id from the request's `Cookie` headers
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value starting a session
pub fn session_cookie(sid: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, sid, max_age_secs
    )
}

/// `Set-Cookie` value clearing the session
pub fn expired_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}
