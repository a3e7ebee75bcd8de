//! # Formdeck
//!
//! Personal dashboard server: session login, client-encrypted UI state,
//! HTML template import, and key/value form storage with an inverted-index
//! matcher.
//!
//! ## Modules
//!
//! - [`index`]: Append-only form records and the inverted index over them
//! - [`storage`]: Form files on disk and the template library
//! - [`auth`]: Users and sessions
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use formdeck::{FieldSet, FormIndex, FormQuery};
//!
//! let index = FormIndex::new();
//! let a = index
//!     .append(FieldSet::new().with("color", "red").with("size", "M"))
//!     .unwrap();
//! index
//!     .append(FieldSet::new().with("color", "blue"))
//!     .unwrap();
//!
//! let found = index.find(&FormQuery::new().value("color", "red"));
//! assert_eq!(found, vec![a]);
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod index;
pub mod storage;

// Re-export top-level types for convenience
pub use index::{
    FieldSet, FormId, FormIndex, FormQuery, IndexConfig, IndexError, IndexResult, IndexStats,
    ValueScope,
};

pub use storage::{FormFileStore, StorageError, StorageResult, TemplateLibrary};

pub use auth::{AuthError, SessionStore, UserStore};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError};
