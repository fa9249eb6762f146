//! Declarative formula engine contract

use crate::error::BoxError;
use crate::types::VariableContext;
use serde_json::Value;

/// Engine for the declarative formula language
///
/// The text is evaluated directly on every call; the engine exposes no
/// compilation step.
pub trait FormulaEngine: Send + Sync {
    /// Evaluate a simple expression against the variables
    fn evaluate_simple_expression(&self, text: &str, context: &VariableContext) -> Result<Value, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct LookupEngine;

    impl FormulaEngine for LookupEngine {
        fn evaluate_simple_expression(&self, text: &str, context: &VariableContext) -> Result<Value, BoxError> {
            context
                .resolve(text)
                .cloned()
                .ok_or_else(|| format!("no variable found for name '{}'", text).into())
        }
    }

    #[test]
    fn test_formula_engine_as_trait_object() {
        let engine: Box<dyn FormulaEngine> = Box::new(LookupEngine);
        let ctx = VariableContext::single("score", 42);

        assert_eq!(engine.evaluate_simple_expression("score", &ctx).unwrap(), json!(42));
        assert!(engine.evaluate_simple_expression("missing", &ctx).is_err());
    }
}
