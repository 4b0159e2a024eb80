//! Infrastructure error types.

use thiserror::Error;

use crate::outcome::{Error as OutcomeError, ErrorKind};

/// Errors that can occur when loading or storing aggregates.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A snapshot could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

impl From<RepositoryError> for OutcomeError {
    fn from(e: RepositoryError) -> Self {
        OutcomeError::new("Repository.Failure", e.to_string(), ErrorKind::Failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_become_failures() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = OutcomeError::from(RepositoryError::from(json_error));

        assert_eq!(error.code(), "Repository.Failure");
        assert_eq!(error.kind(), ErrorKind::Failure);
        assert!(error.message().starts_with("Serialization error"));
    }
}
