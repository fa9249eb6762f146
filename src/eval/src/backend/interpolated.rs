//! Interpolated expression adapter

use dmn_eval_core::{BoxError, ElProvider, EvaluationError, Expression, Result, VariableContext};
use serde_json::Value;
use std::sync::Arc;

/// Parses each expression once and reuses the parsed form
#[derive(Clone)]
pub struct InterpolatedAdapter {
    provider: Arc<dyn ElProvider>,
}

impl InterpolatedAdapter {
    pub fn new(provider: Arc<dyn ElProvider>) -> Self {
        Self { provider }
    }

    /// Evaluate `text` using the parsed form cached on `expression`
    ///
    /// Parse and evaluation failures both surface as
    /// [`EvaluationError::EvaluationFailure`] labelled with `language` and the
    /// expression's text as written, before any `${...}` wrapping.
    pub fn evaluate(
        &self,
        language: &str,
        text: &str,
        context: &VariableContext,
        expression: &Expression,
    ) -> Result<Value> {
        let source = expression.text().unwrap_or(text);
        let fail = |e: BoxError| EvaluationError::unable_to_evaluate(source, language, e);

        let parsed = expression
            .el_slot()
            .get_or_try_install(language, || self.provider.create_expression(text))
            .map_err(fail)?;

        parsed.get_value(context).map_err(fail)
    }
}
