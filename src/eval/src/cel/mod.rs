//! CEL (Common Expression Language) collaborators
//!
//! Default formula engine, interpolated-expression provider and script
//! backend used when the caller does not inject its own.

pub mod convert;
pub mod error;
pub mod formula;
pub mod script;
pub mod template;

pub use error::{CelError, Result};
pub use formula::CelFormulaEngine;
pub use script::{CelCompiledScript, CelScriptBackend};
pub use template::{CelElProvider, TemplateExpression};

use cel_interpreter::{Context, Program};
use serde_json::Value;

use convert::{cel_to_json, json_to_cel};

/// Compile CEL source into a reusable program
pub(crate) fn compile(source: &str) -> Result<Program> {
    Program::compile(source).map_err(|e| CelError::CompilationError(format!("{:?}", e)))
}

/// Execute a program with the given variables in scope
pub(crate) fn execute<'v, I>(program: &Program, variables: I) -> Result<Value>
where
    I: IntoIterator<Item = (&'v str, &'v Value)>,
{
    let mut context = Context::default();
    for (name, value) in variables {
        context.add_variable_from_value(name, json_to_cel(value));
    }

    let result = program
        .execute(&context)
        .map_err(|e| CelError::EvaluationError(format!("{:?}", e)))?;

    Ok(cel_to_json(&result))
}
