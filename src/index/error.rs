//! Index error types

use crate::index::FormId;
use thiserror::Error;

/// Errors raised by the form index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A submission must carry at least one field
    #[error("Field set is empty")]
    EmptyFieldSet,

    /// The injected id source handed out an id that does not follow the last one
    #[error("Identifier {next} does not follow {previous}")]
    NonMonotonicId { previous: FormId, next: FormId },
}

/// Result type alias for index operations
pub type IndexResult<T> = Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(IndexError::EmptyFieldSet.to_string(), "Field set is empty");

        let err = IndexError::NonMonotonicId {
            previous: FormId::new(2, 10),
            next: FormId::new(1, 11),
        };
        assert_eq!(
            err.to_string(),
            "Identifier form_11_1 does not follow form_10_2"
        );
    }
}
