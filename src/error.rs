//! Error handling module
//!
//! Provides unified error types for the collaborator boundaries (collection,
//! snapshot store). The comparison engine itself has no fatal error path:
//! malformed input degrades locally instead of aborting a run.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Input shape error: {0}")]
    InputShape(String),

    #[error("Collection error: {0}")]
    Collection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for collector and store operations
pub type CompareResult<T> = Result<T, CompareError>;

/// Helper function to create a collection error
pub fn collection_error(msg: impl Into<String>) -> CompareError {
    CompareError::Collection(msg.into())
}

/// Helper function to create a not found error
pub fn not_found_error(msg: impl Into<String>) -> CompareError {
    CompareError::NotFound(msg.into())
}
