//! Collaborator contracts consumed by the evaluation handler

pub mod formula;
pub mod el;
pub mod script;
pub mod resource;

// Re-export commonly used traits
pub use formula::FormulaEngine;
pub use el::{ElExpression, ElProvider};
pub use script::{
    Compilable, CompiledScript, ScriptBackend, ScriptBackendRegistry, ScriptBindings,
    VARIABLE_CONTEXT_BINDING,
};
pub use resource::{ResourceError, ResourceLookup};
