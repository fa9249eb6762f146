//! # DMN Expression Evaluation Core
//!
//! Shared types, collaborator traits, and error handling for the expression
//! evaluation dispatcher. Backend implementations live in `dmn-eval`; this
//! package only knows their invocation contracts.

pub mod types;
pub mod traits;
pub mod cache;
pub mod error;

// Re-export commonly used types
pub use cache::CompiledSlot;
pub use error::{BoxError, EvaluationError, Result};
pub use types::{Expression, LanguageClass, VariableContext};
pub use traits::{
    Compilable, CompiledScript, ElExpression, ElProvider, FormulaEngine, ResourceError,
    ResourceLookup, ScriptBackend, ScriptBackendRegistry, ScriptBindings,
};

/// Value type flowing through every backend
pub type Value = serde_json::Value;
