//! General script backend contract

use crate::error::BoxError;
use crate::types::VariableContext;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Binding name under which the raw variable context is exposed to scripts
pub const VARIABLE_CONTEXT_BINDING: &str = "variableContext";

/// Script bindings layered over a variable context
///
/// Lookups check the backend's own bindings first and fall back to the
/// variable context. Writes only touch the backend's bindings. The borrow
/// ties the bindings to a single evaluation call.
///
/// Once [`with_variable_context`](Self::with_variable_context) is set, the
/// context itself is visible under [`VARIABLE_CONTEXT_BINDING`], borrowed and
/// ahead of any binding of that name.
#[derive(Debug)]
pub struct ScriptBindings<'ctx> {
    bindings: HashMap<String, Value>,
    context: &'ctx VariableContext,
    expose_context: bool,
}

impl<'ctx> ScriptBindings<'ctx> {
    /// Wrap backend-native bindings around a variable context
    pub fn wrap(bindings: HashMap<String, Value>, context: &'ctx VariableContext) -> Self {
        Self {
            bindings,
            context,
            expose_context: false,
        }
    }

    /// Expose the variable context under `variableContext`
    pub fn with_variable_context(mut self) -> Self {
        self.expose_context = true;
        self
    }

    fn context_binding(&self, name: &str) -> Option<&Value> {
        (self.expose_context && name == VARIABLE_CONTEXT_BINDING).then(|| self.context.as_value())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.context_binding(name)
            .or_else(|| self.bindings.get(name))
            .or_else(|| self.context.resolve(name))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a backend binding, shadowing any context variable of that name
    pub fn insert<S: Into<String>>(&mut self, name: S, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// Iterate over all visible names and values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        let exposed = self
            .expose_context
            .then(|| (VARIABLE_CONTEXT_BINDING, self.context.as_value()));
        let hidden = move |name: &str| exposed.is_some() && name == VARIABLE_CONTEXT_BINDING;
        let native = self
            .bindings
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .filter(move |&(name, _)| !hidden(name));
        let inherited = self
            .context
            .iter()
            .filter(move |&(name, _)| !hidden(name) && !self.bindings.contains_key(name));

        exposed.into_iter().chain(native).chain(inherited)
    }

    /// The variable context underneath the bindings
    pub fn variable_context(&self) -> &'ctx VariableContext {
        self.context
    }
}

/// Compiled form of a script, reusable across evaluations
pub trait CompiledScript: Send + Sync {
    fn eval(&self, bindings: &ScriptBindings<'_>) -> Result<Value, BoxError>;
}

/// Ahead-of-time compilation capability of a script backend
pub trait Compilable: Send + Sync {
    fn compile(&self, text: &str) -> Result<Arc<dyn CompiledScript>, BoxError>;
}

/// Execution engine for one script language
pub trait ScriptBackend: Send + Sync {
    /// Human-readable language name used in error messages
    fn language_name(&self) -> &str;

    /// Fresh backend-native bindings for one evaluation
    fn create_bindings(&self) -> HashMap<String, Value> {
        HashMap::new()
    }

    /// Evaluate script text directly
    fn eval(&self, text: &str, bindings: &ScriptBindings<'_>) -> Result<Value, BoxError>;

    /// Compilation capability, if the backend supports it
    fn as_compilable(&self) -> Option<&dyn Compilable> {
        None
    }
}

/// Pluggable lookup of script backends by language identifier
pub trait ScriptBackendRegistry: Send + Sync {
    fn resolve(&self, language: &str) -> Option<Arc<dyn ScriptBackend>>;
}
