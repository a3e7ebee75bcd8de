//! Account error types

use thiserror::Error;

/// Errors raised by the user and session stores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password left blank
    #[error("Username and password are required")]
    MissingCredentials,

    /// Registration for a name that already exists
    #[error("Username already taken")]
    UsernameTaken,

    /// Operation on a user that was never registered
    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

/// Result type alias for account operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::UsernameTaken.to_string(), "Username already taken");
        assert_eq!(
            AuthError::UnknownUser("ada".to_string()).to_string(),
            "Unknown user: ada"
        );
    }
}
