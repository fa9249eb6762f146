//! Counting and recording collaborators for handler tests

use dmn_eval::cel::{CelElProvider, CelFormulaEngine, CelScriptBackend};
use dmn_eval_core::{
    BoxError, Compilable, CompiledScript, ElExpression, ElProvider, FormulaEngine, ScriptBackend,
    ScriptBindings, VariableContext,
};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Formula engine counting its calls, optionally failing with a fixed message
#[derive(Default)]
pub struct CountingFormulaEngine {
    calls: AtomicUsize,
    failure: Option<String>,
}

impl CountingFormulaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FormulaEngine for CountingFormulaEngine {
    fn evaluate_simple_expression(&self, text: &str, context: &VariableContext) -> Result<Value, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => CelFormulaEngine::new().evaluate_simple_expression(text, context),
        }
    }
}

/// CEL template provider counting parses, with an optional parse delay
#[derive(Default)]
pub struct CountingElProvider {
    parses: AtomicUsize,
    parsed_texts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl CountingElProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slow parser, widening the window for racing first evaluations
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn parses(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }

    pub fn parsed_texts(&self) -> Vec<String> {
        self.parsed_texts.lock().unwrap().clone()
    }
}

impl ElProvider for CountingElProvider {
    fn create_expression(&self, text: &str) -> Result<Arc<dyn ElExpression>, BoxError> {
        self.parses.fetch_add(1, Ordering::SeqCst);
        self.parsed_texts.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        CelElProvider::new().create_expression(text)
    }
}

/// CEL script backend counting compilations and direct evaluations
pub struct CountingScriptBackend {
    compilable: bool,
    compiles: AtomicUsize,
    direct_evals: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingScriptBackend {
    pub fn compilable() -> Self {
        Self {
            compilable: true,
            compiles: AtomicUsize::new(0),
            direct_evals: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn interpreted() -> Self {
        Self {
            compilable: false,
            ..Self::compilable()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn compiles(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }

    pub fn direct_evals(&self) -> usize {
        self.direct_evals.load(Ordering::SeqCst)
    }
}

impl ScriptBackend for CountingScriptBackend {
    fn language_name(&self) -> &str {
        "Counting CEL"
    }

    fn eval(&self, text: &str, bindings: &ScriptBindings<'_>) -> Result<Value, BoxError> {
        self.direct_evals.fetch_add(1, Ordering::SeqCst);
        CelScriptBackend::new().eval(text, bindings)
    }

    fn as_compilable(&self) -> Option<&dyn Compilable> {
        if self.compilable {
            Some(self)
        } else {
            None
        }
    }
}

impl Compilable for CountingScriptBackend {
    fn compile(&self, text: &str) -> Result<Arc<dyn CompiledScript>, BoxError> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        CelScriptBackend::new().compile(text)
    }
}

/// Backend echoing the text it received and the bindings it saw
///
/// Native bindings contain `engine = "recording"`.
#[derive(Default)]
pub struct RecordingScriptBackend {
    texts: Mutex<Vec<String>>,
}

impl RecordingScriptBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl ScriptBackend for RecordingScriptBackend {
    fn language_name(&self) -> &str {
        "Recording"
    }

    fn create_bindings(&self) -> std::collections::HashMap<String, Value> {
        [("engine".to_string(), json!("recording"))].into_iter().collect()
    }

    fn eval(&self, text: &str, bindings: &ScriptBindings<'_>) -> Result<Value, BoxError> {
        self.texts.lock().unwrap().push(text.to_string());
        let seen: Map<String, Value> = bindings
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Ok(json!({ "text": text, "bindings": seen }))
    }
}

/// Backend whose every evaluation fails
pub struct FailingScriptBackend;

impl ScriptBackend for FailingScriptBackend {
    fn language_name(&self) -> &str {
        "Failing Script"
    }

    fn eval(&self, _text: &str, _bindings: &ScriptBindings<'_>) -> Result<Value, BoxError> {
        Err("division by zero".into())
    }
}
