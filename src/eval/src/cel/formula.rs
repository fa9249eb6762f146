//! CEL-backed formula engine

use dmn_eval_core::{BoxError, FormulaEngine, VariableContext};
use serde_json::Value;

/// Formula engine evaluating simple expressions as CEL
///
/// Every call compiles the text again; the engine keeps no cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct CelFormulaEngine;

impl CelFormulaEngine {
    pub fn new() -> Self {
        Self
    }
}

impl FormulaEngine for CelFormulaEngine {
    fn evaluate_simple_expression(&self, text: &str, context: &VariableContext) -> Result<Value, BoxError> {
        let program = super::compile(text)?;
        Ok(super::execute(&program, context.iter())?)
    }
}
