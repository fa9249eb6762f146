//! Script backend registry keyed by language name

use dashmap::DashMap;
use dmn_eval_core::{ScriptBackend, ScriptBackendRegistry};
use std::sync::Arc;
use tracing::debug;

use crate::cel::CelScriptBackend;

/// Concurrent registry of script backends
///
/// Language names are matched case-insensitively. Backends are shared
/// between all evaluations of their language.
///
/// # Examples
///
/// ```
/// use dmn_eval::registry::DefaultScriptBackendRegistry;
/// use dmn_eval_core::ScriptBackendRegistry;
///
/// let registry = DefaultScriptBackendRegistry::with_defaults();
/// assert!(registry.resolve("CEL").is_some());
/// assert!(registry.resolve("cobol").is_none());
/// ```
pub struct DefaultScriptBackendRegistry {
    backends: DashMap<String, Arc<dyn ScriptBackend>>,
}

impl DefaultScriptBackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            backends: DashMap::new(),
        }
    }

    /// Create a registry with the built-in CEL backend under `cel`
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register("cel", Arc::new(CelScriptBackend::new()));
        registry
    }

    /// Register a backend, replacing any previous one for the language
    pub fn register<S: AsRef<str>>(&self, language: S, backend: Arc<dyn ScriptBackend>) -> Option<Arc<dyn ScriptBackend>> {
        let key = language.as_ref().to_lowercase();
        debug!("Registering script backend '{}' for language '{}'", backend.language_name(), key);
        self.backends.insert(key, backend)
    }

    /// Remove the backend for a language
    pub fn unregister(&self, language: &str) -> Option<Arc<dyn ScriptBackend>> {
        self.backends
            .remove(&language.to_lowercase())
            .map(|(_, backend)| backend)
    }

    /// Registered language names, sorted
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.backends.iter().map(|e| e.key().clone()).collect();
        languages.sort();
        languages
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl ScriptBackendRegistry for DefaultScriptBackendRegistry {
    fn resolve(&self, language: &str) -> Option<Arc<dyn ScriptBackend>> {
        self.backends
            .get(&language.to_lowercase())
            .map(|entry| entry.value().clone())
    }
}

impl Default for DefaultScriptBackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
