//! Unified error types for expression evaluation
//!
//! Every backend failure reaches the caller as one of the variants below.
//! Formula engine failures are the only ones passed through untouched; the
//! interpolated and script paths always wrap theirs into
//! [`EvaluationError::EvaluationFailure`].

use thiserror::Error;

/// Boxed error produced by an external collaborator (engine, provider, backend)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Expression evaluation errors
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A language identifier was required but empty
    #[error("Expression language identifier must not be empty")]
    MissingLanguageIdentifier,

    /// No script backend is registered for the language
    #[error("Unable to find script engine for expression language '{0}'")]
    NoBackendForLanguage(String),

    /// A backend failed to parse, compile or execute the expression
    #[error("Unable to evaluate expression for language '{language}': '{expression}'")]
    EvaluationFailure {
        expression: String,
        language: String,
        #[source]
        source: BoxError,
    },

    /// Failure raised by the formula engine, reported as-is
    #[error("{0}")]
    Formula(#[source] BoxError),
}

impl EvaluationError {
    /// Create an evaluation failure carrying the text, backend label and cause
    pub fn unable_to_evaluate<E, L>(expression: E, language: L, source: BoxError) -> Self
    where
        E: Into<String>,
        L: Into<String>,
    {
        EvaluationError::EvaluationFailure {
            expression: expression.into(),
            language: language.into(),
            source,
        }
    }

    /// Create a missing-backend error
    pub fn no_backend_for_language<S: Into<String>>(language: S) -> Self {
        EvaluationError::NoBackendForLanguage(language.into())
    }

    /// Expression text attached to the failure, if any
    pub fn expression(&self) -> Option<&str> {
        match self {
            EvaluationError::EvaluationFailure { expression, .. } => Some(expression),
            _ => None,
        }
    }

    /// Language or backend label attached to the failure, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            EvaluationError::EvaluationFailure { language, .. } => Some(language),
            EvaluationError::NoBackendForLanguage(language) => Some(language),
            _ => None,
        }
    }
}
