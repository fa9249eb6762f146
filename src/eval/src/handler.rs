//! Expression evaluation dispatcher
//!
//! # Architecture
//!
//! ```text
//! (language, expression, context)
//!        ↓
//!  TextNormalizer ── no text ──→ Ok(None)
//!        ↓
//!  LanguageClass::of(language)
//!        ├── Formula      → FormulaAdapter      → FormulaEngine
//!        ├── Interpolated → InterpolatedAdapter → ElProvider   [el_slot]
//!        └── Script(l)    → ScriptAdapter       → ScriptBackend [script_slot]
//! ```

use dmn_eval_core::types::{is_formula_language, is_interpolated_language, is_script_language};
use dmn_eval_core::{Expression, LanguageClass, Result, VariableContext};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::backend::{FormulaAdapter, InterpolatedAdapter, ScriptAdapter};
use crate::config::EngineConfiguration;
use crate::normalizer::TextNormalizer;

/// Routes expressions to the formula, interpolated or script backend
///
/// The handler is `Send + Sync`; share one instance between threads. All
/// per-expression state lives in the [`Expression`] objects.
#[derive(Clone)]
pub struct ExpressionEvaluationHandler {
    normalizer: Arc<TextNormalizer>,
    formula: FormulaAdapter,
    interpolated: InterpolatedAdapter,
    script: ScriptAdapter,
    default_language: String,
}

impl ExpressionEvaluationHandler {
    /// Create a handler from an engine configuration
    ///
    /// Prelude fragments are loaded once, here.
    pub fn new(configuration: &EngineConfiguration) -> Self {
        let config = configuration.config();
        let normalizer = Arc::new(TextNormalizer::new(configuration.load_prelude()));

        Self {
            formula: FormulaAdapter::new(configuration.formula_engine()),
            interpolated: InterpolatedAdapter::new(configuration.el_provider()),
            script: ScriptAdapter::new(
                configuration.script_registry(),
                normalizer.clone(),
                config.enable_script_compilation,
            ),
            normalizer,
            default_language: config.default_expression_language.clone(),
        }
    }

    /// Evaluate an expression in the given language
    ///
    /// Returns `Ok(None)` without touching any backend when the expression
    /// has no text.
    ///
    /// # Errors
    ///
    /// - `MissingLanguageIdentifier` if `language` is blank
    /// - `NoBackendForLanguage` if no script backend serves `language`
    /// - `EvaluationFailure` if the interpolated or script backend fails
    /// - `Formula` with the formula engine's own error
    pub fn evaluate_expression(
        &self,
        language: &str,
        expression: &Expression,
        context: &VariableContext,
    ) -> Result<Option<Value>> {
        let Some(text) = self.normalizer.resolve_text(expression, language) else {
            debug!("Expression {:?} has no text, skipping evaluation", expression.id());
            return Ok(None);
        };

        let class = LanguageClass::of(language)?;
        debug!("Dispatching '{}' expression as {:?}", language, class);

        let value = match class {
            LanguageClass::Formula => self.formula.evaluate(&text, context)?,
            LanguageClass::Interpolated => self.interpolated.evaluate(language, &text, context, expression)?,
            LanguageClass::Script(language) => self.script.evaluate(language, &text, context, expression)?,
        };

        Ok(Some(value))
    }

    /// Evaluate using the expression's own language, or the default language
    pub fn evaluate(&self, expression: &Expression, context: &VariableContext) -> Result<Option<Value>> {
        let language = self.language_of(expression);
        self.evaluate_expression(language, expression, context)
    }

    /// Language an expression is evaluated in
    pub fn language_of<'a>(&'a self, expression: &'a Expression) -> &'a str {
        expression
            .language()
            .filter(|language| !language.trim().is_empty())
            .unwrap_or(self.default_language.as_str())
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn is_formula_language(&self, language: &str) -> Result<bool> {
        is_formula_language(language)
    }

    pub fn is_interpolated_language(&self, language: &str) -> Result<bool> {
        is_interpolated_language(language)
    }

    pub fn is_script_language(&self, language: &str) -> Result<bool> {
        is_script_language(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_eval_core::EvaluationError;
    use serde_json::json;

    fn handler() -> ExpressionEvaluationHandler {
        EngineConfiguration::default().build_handler()
    }

    #[test]
    fn test_handler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExpressionEvaluationHandler>();
    }

    #[test]
    fn test_default_language() {
        let handler = handler();
        let ctx = VariableContext::new().with_variable("a", 3);

        assert_eq!(handler.default_language(), "feel");
        assert_eq!(handler.evaluate(&Expression::new("a > 2"), &ctx).unwrap(), Some(json!(true)));
    }

    #[test]
    fn test_expression_language_overrides_default() {
        let handler = handler();
        let expr = Expression::new("a * 2").with_language("juel");
        let ctx = VariableContext::single("a", 21);

        assert_eq!(handler.language_of(&expr), "juel");
        assert_eq!(handler.evaluate(&expr, &ctx).unwrap(), Some(json!(42)));
        assert!(expr.el_slot().is_populated());
    }

    #[test]
    fn test_blank_expression_language_uses_default() {
        let handler = handler();
        let expr = Expression::new("1").with_language("  ");
        assert_eq!(handler.language_of(&expr), "feel");
    }

    #[test]
    fn test_classification_checks() {
        let handler = handler();
        assert!(handler.is_formula_language("FEEL").unwrap());
        assert!(handler.is_interpolated_language("juel").unwrap());
        assert!(handler.is_script_language("cel").unwrap());
        assert!(matches!(
            handler.is_script_language(""),
            Err(EvaluationError::MissingLanguageIdentifier)
        ));
    }
}
