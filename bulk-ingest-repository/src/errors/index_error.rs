//! Index error types.
//!
//! This module defines the error types that can occur while staging or
//! committing documents against an index.

use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The document was rejected while being staged into a batch.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A batch commit failed as a unit.
    #[error("Commit error: {0}")]
    CommitError(String),

    /// Failed to create the index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl IndexError {
    /// Create an invalid document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a commit error.
    pub fn commit(msg: impl Into<String>) -> Self {
        Self::CommitError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_build_matching_variants() {
        assert!(matches!(
            IndexError::invalid_document("x"),
            IndexError::InvalidDocument(_)
        ));
        assert!(matches!(
            IndexError::connection("x"),
            IndexError::ConnectionError(_)
        ));
        assert!(matches!(IndexError::commit("x"), IndexError::CommitError(_)));
        assert!(matches!(
            IndexError::index_creation("x"),
            IndexError::IndexCreationError(_)
        ));
        assert!(matches!(IndexError::parse("x"), IndexError::ParseError(_)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            IndexError::commit("commit 2 rejected").to_string(),
            "Commit error: commit 2 rejected"
        );
        assert_eq!(
            IndexError::invalid_document("document 'a' must be a JSON object").to_string(),
            "Invalid document: document 'a' must be a JSON object"
        );
    }
}
