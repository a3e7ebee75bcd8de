//! Storage error types
//!
//! Defines all errors that can occur when reading or writing form files and
//! imported templates.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Name is empty or would escape the storage directory
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Requested file or template does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Reject names that are empty or could address anything outside one directory.
///
/// Without separators the name is a single path component, so only `.` and
/// `..` themselves can escape; `v1..2.html` is an ordinary file name.
pub(crate) fn validate_name(name: &str) -> StorageResult<()> {
    let unsafe_name = name.trim().is_empty()
        || name.contains(['/', '\\', '\0'])
        || name == "."
        || name == "..";

    if unsafe_name {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::NotFound("form_1_1".to_string());
        assert_eq!(err.to_string(), "Not found: form_1_1");

        let err = StorageError::InvalidName("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid name: ../etc");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("form_1_1").is_ok());
        assert!(validate_name("survey.html").is_ok());
        assert!(validate_name("v1..2.html").is_ok());
        assert!(validate_name("..hidden").is_ok());

        for bad in ["", "  ", ".", "..", "../secret", "..\\secret", "a/b", "a\\b", "x\0y"] {
            assert!(validate_name(bad).is_err(), "{:?} accepted", bad);
        }
    }
}
