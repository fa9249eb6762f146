//! Interpolated expression language contract

use crate::error::BoxError;
use crate::types::VariableContext;
use serde_json::Value;
use std::sync::Arc;

/// Parsed interpolated expression, reusable across evaluations
pub trait ElExpression: Send + Sync {
    /// Evaluate against the variables
    fn get_value(&self, context: &VariableContext) -> Result<Value, BoxError>;
}

/// Parser producing reusable interpolated expressions
pub trait ElProvider: Send + Sync {
    /// Parse delimiter-wrapped text such as `${a + b}`
    fn create_expression(&self, text: &str) -> Result<Arc<dyn ElExpression>, BoxError>;
}
