//! Error types for the CEL collaborators

use thiserror::Error;

/// CEL operation errors
#[derive(Error, Debug)]
pub enum CelError {
    #[error("CEL compilation failed: {0}")]
    CompilationError(String),

    #[error("CEL evaluation failed: {0}")]
    EvaluationError(String),

    #[error("Invalid template at offset {offset}: {message}")]
    InvalidTemplate { offset: usize, message: String },
}

/// Result type for CEL operations
pub type Result<T> = std::result::Result<T, CelError>;
