//! Formdeck Accounts
//!
//! In-memory user and session bookkeeping for the dashboard:
//!
//! - **users**: salted password hashes and the per-user encrypted UI context
//! - **sessions**: cookie session ids, including guest sessions
//! - **error**: Error types

pub mod error;
pub mod sessions;
pub mod users;

pub use error::{AuthError, AuthResult};
pub use sessions::{Session, SessionStore};
pub use users::UserStore;
