//! CEL script backend with ahead-of-time compilation

use cel_interpreter::Program;
use dmn_eval_core::{BoxError, Compilable, CompiledScript, ScriptBackend, ScriptBindings};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Language name reported in evaluation failures
pub const CEL_LANGUAGE_NAME: &str = "CEL";

/// Script backend running CEL programs against script bindings
#[derive(Debug, Default, Clone, Copy)]
pub struct CelScriptBackend;

impl CelScriptBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptBackend for CelScriptBackend {
    fn language_name(&self) -> &str {
        CEL_LANGUAGE_NAME
    }

    fn eval(&self, text: &str, bindings: &ScriptBindings<'_>) -> Result<Value, BoxError> {
        let program = super::compile(text)?;
        Ok(super::execute(&program, bindings.iter())?)
    }

    fn as_compilable(&self) -> Option<&dyn Compilable> {
        Some(self)
    }
}

impl Compilable for CelScriptBackend {
    fn compile(&self, text: &str) -> Result<Arc<dyn CompiledScript>, BoxError> {
        let program = super::compile(text)?;
        Ok(Arc::new(CelCompiledScript { program }))
    }
}

/// Compiled CEL program
pub struct CelCompiledScript {
    program: Program,
}

impl CompiledScript for CelCompiledScript {
    fn eval(&self, bindings: &ScriptBindings<'_>) -> Result<Value, BoxError> {
        Ok(super::execute(&self.program, bindings.iter())?)
    }
}

impl fmt::Debug for CelCompiledScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CelCompiledScript").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_eval_core::VariableContext;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_eval_reads_bindings() {
        let backend = CelScriptBackend::new();
        let ctx = VariableContext::new().with_variable("x", 7);
        let mut bindings = ScriptBindings::wrap(HashMap::new(), &ctx);
        bindings.insert("y", json!(3));

        assert_eq!(backend.eval("x - y", &bindings).unwrap(), json!(4));
    }

    #[test]
    fn test_compiled_script_is_reusable() {
        let backend = CelScriptBackend::new();
        let compiled = backend.as_compilable().unwrap().compile("x * x").unwrap();

        for (x, expected) in [(2, 4), (5, 25)] {
            let ctx = VariableContext::single("x", x);
            let bindings = ScriptBindings::wrap(HashMap::new(), &ctx);
            assert_eq!(compiled.eval(&bindings).unwrap(), json!(expected));
        }
    }

    #[test]
    fn test_compile_error() {
        let backend = CelScriptBackend::new();
        let err = backend
            .as_compilable()
            .unwrap()
            .compile("x *")
            .err()
            .expect("compilation should fail");
        assert!(err.to_string().starts_with("CEL compilation failed"));
    }
}
