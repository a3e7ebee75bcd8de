//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! JSON bodies use serde; login and registration arrive as urlencoded forms.

use serde::{Deserialize, Serialize};

use crate::index::IndexStats;

// ============================================
// ACCOUNT DTOs
// ============================================

/// Login form submission
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Raw query string to carry over to `/app`
    #[serde(default)]
    pub redirect: String,
}

/// Registration form submission
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters understood by `/app`
#[derive(Debug, Default, Deserialize)]
pub struct AppParams {
    #[serde(default)]
    pub bypass: Option<String>,
}

/// Encrypted UI context sent by the client
#[derive(Debug, Deserialize)]
pub struct SaveContextRequest {
    /// Base64 AES-GCM ciphertext, opaque to the server
    pub enc: String,
}

// ============================================
// FORM DTOs
// ============================================

/// Response after storing a form
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredResponse {
    /// Status: "stored"
    pub status: String,
    /// External name of the stored form
    pub file: String,
}

/// Plain status acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub index: IndexStats,
    pub templates: usize,
    pub users: usize,
    pub sessions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
