//! # DMN Expression Evaluation
//!
//! Evaluates decision-model expressions written in one of several languages:
//!
//! - **Formula** (`feel` and the FEEL namespaces) - evaluated directly on every call
//! - **Interpolated** (`juel`) - `${...}` templates parsed once per expression
//! - **Script** (any other language) - resolved from a backend registry and,
//!   when the backend supports it, compiled once per expression
//!
//! Compiled artifacts are cached on the [`Expression`] object itself, so a
//! shared expression is parsed or compiled at most once no matter how many
//! threads evaluate it.
//!
//! ## Example
//!
//! ```rust
//! use dmn_eval::{EngineConfiguration, Expression, VariableContext};
//! use serde_json::json;
//!
//! let handler = EngineConfiguration::default().build_handler();
//! let expression = Expression::new("a + b");
//!
//! let ctx = VariableContext::new().with_variable("a", 2).with_variable("b", 3);
//! let result = handler.evaluate_expression("juel", &expression, &ctx).unwrap();
//! assert_eq!(result, Some(json!(5)));
//!
//! let ctx = VariableContext::new().with_variable("a", 10).with_variable("b", -1);
//! let result = handler.evaluate_expression("juel", &expression, &ctx).unwrap();
//! assert_eq!(result, Some(json!(9)));
//! ```

pub mod backend;
pub mod cel;
pub mod config;
pub mod handler;
pub mod normalizer;
pub mod registry;
pub mod resource;

// Re-export commonly used types
pub use config::{EngineConfiguration, EvaluationConfig};
pub use handler::ExpressionEvaluationHandler;
pub use normalizer::{ScriptPrelude, TextNormalizer};
pub use registry::DefaultScriptBackendRegistry;
pub use resource::{DirectoryResourceLookup, StaticResourceLookup};

pub use dmn_eval_core::{EvaluationError, Expression, LanguageClass, Result, VariableContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
