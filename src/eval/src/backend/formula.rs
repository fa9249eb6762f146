//! Declarative formula adapter

use dmn_eval_core::{EvaluationError, FormulaEngine, Result, VariableContext};
use serde_json::Value;
use std::sync::Arc;

/// Evaluates formula text directly on every call
#[derive(Clone)]
pub struct FormulaAdapter {
    engine: Arc<dyn FormulaEngine>,
}

impl FormulaAdapter {
    pub fn new(engine: Arc<dyn FormulaEngine>) -> Self {
        Self { engine }
    }

    /// Engine failures are returned unchanged as [`EvaluationError::Formula`]
    pub fn evaluate(&self, text: &str, context: &VariableContext) -> Result<Value> {
        self.engine
            .evaluate_simple_expression(text, context)
            .map_err(EvaluationError::Formula)
    }
}
