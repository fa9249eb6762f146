//! General script adapter

use dmn_eval_core::{
    BoxError, EvaluationError, Expression, Result, ScriptBackend, ScriptBackendRegistry, ScriptBindings,
    VariableContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::normalizer::TextNormalizer;

/// Runs expressions on a script backend resolved per language
#[derive(Clone)]
pub struct ScriptAdapter {
    registry: Arc<dyn ScriptBackendRegistry>,
    normalizer: Arc<TextNormalizer>,
    enable_compilation: bool,
}

impl ScriptAdapter {
    pub fn new(
        registry: Arc<dyn ScriptBackendRegistry>,
        normalizer: Arc<TextNormalizer>,
        enable_compilation: bool,
    ) -> Self {
        Self {
            registry,
            normalizer,
            enable_compilation,
        }
    }

    /// Resolve the backend for a language
    pub fn backend_for(&self, language: &str) -> Result<Arc<dyn ScriptBackend>> {
        self.registry
            .resolve(language)
            .ok_or_else(|| EvaluationError::no_backend_for_language(language))
    }

    /// Evaluate script text against the variables
    ///
    /// Compilable backends compile the prelude-augmented text once per
    /// expression; other backends evaluate it on every call. Failures are
    /// labelled with the expression's own text, without the prelude.
    pub fn evaluate(
        &self,
        language: &str,
        text: &str,
        context: &VariableContext,
        expression: &Expression,
    ) -> Result<Value> {
        let backend = self.backend_for(language)?;

        let bindings = ScriptBindings::wrap(backend.create_bindings(), context).with_variable_context();

        let source = expression.text().unwrap_or(text);
        let fail = |e: BoxError| EvaluationError::unable_to_evaluate(source, backend.language_name(), e);

        let script = self.normalizer.augment_script(text);
        match backend.as_compilable().filter(|_| self.enable_compilation) {
            Some(compiler) => {
                let compiled = expression
                    .script_slot()
                    .get_or_try_install(language, || compiler.compile(&script))
                    .map_err(fail)?;
                compiled.eval(&bindings).map_err(fail)
            }
            None => {
                debug!("Evaluating {} script without compilation", backend.language_name());
                backend.eval(&script, &bindings).map_err(fail)
            }
        }
    }
}
