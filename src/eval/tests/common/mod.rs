//! Common test utilities shared by the handler integration tests

#![allow(dead_code)]

pub mod mocks;

use dmn_eval::{DefaultScriptBackendRegistry, EngineConfiguration, ExpressionEvaluationHandler};
use dmn_eval_core::ScriptBackend;
use std::sync::Arc;

/// Handler with CEL defaults plus extra script backends
pub fn handler_with_backends(backends: Vec<(&str, Arc<dyn ScriptBackend>)>) -> ExpressionEvaluationHandler {
    let registry = DefaultScriptBackendRegistry::with_defaults();
    for (language, backend) in backends {
        registry.register(language, backend);
    }

    EngineConfiguration::default()
        .with_script_registry(Arc::new(registry))
        .build_handler()
}
