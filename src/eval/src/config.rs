//! Handler configuration
//!
//! [`EvaluationConfig`] holds plain settings and can be read from the
//! environment. [`EngineConfiguration`] bundles those settings with the
//! collaborators the handler dispatches to.
//!
//! Environment variables:
//! - `DMN_EVAL_DEFAULT_LANGUAGE` - language for expressions without one (default: feel)
//! - `DMN_EVAL_SCRIPT_COMPILATION` - compile scripts ahead of time (default: true)
//! - `DMN_EVAL_GLOBAL_PRELUDE` - global prelude resource name (default: dmnGlobal.js)
//! - `DMN_EVAL_APP_PRELUDE` - application prelude resource name (default: dmn.js)
//! - `DMN_EVAL_GLOBAL_PRELUDE_DIR` - directory serving the global prelude
//! - `DMN_EVAL_APP_PRELUDE_DIR` - directory serving the application prelude

use dmn_eval_core::types::FEEL_EXPRESSION_LANGUAGE_ALTERNATIVE;
use dmn_eval_core::{ElProvider, FormulaEngine, ResourceLookup, ScriptBackendRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::cel::{CelElProvider, CelFormulaEngine};
use crate::handler::ExpressionEvaluationHandler;
use crate::normalizer::{ScriptPrelude, APPLICATION_PRELUDE_RESOURCE, GLOBAL_PRELUDE_RESOURCE};
use crate::registry::DefaultScriptBackendRegistry;
use crate::resource::DirectoryResourceLookup;

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Language used when an expression does not declare one (default: feel)
    pub default_expression_language: String,

    /// Compile scripts ahead of time when the backend supports it (default: true)
    pub enable_script_compilation: bool,

    /// Name of the global prelude resource (default: dmnGlobal.js)
    pub global_prelude_resource: String,

    /// Name of the application prelude resource (default: dmn.js)
    pub application_prelude_resource: String,

    /// Directory serving the global prelude
    pub global_prelude_dir: Option<PathBuf>,

    /// Directory serving the application prelude
    pub application_prelude_dir: Option<PathBuf>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            default_expression_language: FEEL_EXPRESSION_LANGUAGE_ALTERNATIVE.to_string(),
            enable_script_compilation: true,
            global_prelude_resource: GLOBAL_PRELUDE_RESOURCE.to_string(),
            application_prelude_resource: APPLICATION_PRELUDE_RESOURCE.to_string(),
            global_prelude_dir: None,
            application_prelude_dir: None,
        }
    }
}

impl EvaluationConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(language) = lookup("DMN_EVAL_DEFAULT_LANGUAGE").filter(|s| !s.trim().is_empty()) {
            config.default_expression_language = language;
        }
        if let Some(value) = lookup("DMN_EVAL_SCRIPT_COMPILATION") {
            match value.trim().parse::<bool>() {
                Ok(enabled) => config.enable_script_compilation = enabled,
                Err(_) => warn!("Ignoring invalid DMN_EVAL_SCRIPT_COMPILATION value '{}'", value),
            }
        }
        if let Some(name) = lookup("DMN_EVAL_GLOBAL_PRELUDE") {
            config.global_prelude_resource = name;
        }
        if let Some(name) = lookup("DMN_EVAL_APP_PRELUDE") {
            config.application_prelude_resource = name;
        }
        config.global_prelude_dir = lookup("DMN_EVAL_GLOBAL_PRELUDE_DIR").map(PathBuf::from);
        config.application_prelude_dir = lookup("DMN_EVAL_APP_PRELUDE_DIR").map(PathBuf::from);

        config
    }
}

/// Settings plus collaborators for building an [`ExpressionEvaluationHandler`]
#[derive(Clone)]
pub struct EngineConfiguration {
    config: EvaluationConfig,
    formula_engine: Arc<dyn FormulaEngine>,
    el_provider: Arc<dyn ElProvider>,
    script_registry: Arc<dyn ScriptBackendRegistry>,
    global_resources: Option<Arc<dyn ResourceLookup>>,
    application_resources: Option<Arc<dyn ResourceLookup>>,
}

impl EngineConfiguration {
    /// CEL collaborators with the given settings
    ///
    /// Prelude directories named in the settings become the resource lookups.
    pub fn new(config: EvaluationConfig) -> Self {
        let global_resources = config
            .global_prelude_dir
            .clone()
            .map(|dir| Arc::new(DirectoryResourceLookup::new(dir)) as Arc<dyn ResourceLookup>);
        let application_resources = config
            .application_prelude_dir
            .clone()
            .map(|dir| Arc::new(DirectoryResourceLookup::new(dir)) as Arc<dyn ResourceLookup>);

        Self {
            config,
            formula_engine: Arc::new(CelFormulaEngine::new()),
            el_provider: Arc::new(CelElProvider::new()),
            script_registry: Arc::new(DefaultScriptBackendRegistry::with_defaults()),
            global_resources,
            application_resources,
        }
    }

    /// Settings read from the environment
    pub fn from_env() -> Self {
        Self::new(EvaluationConfig::from_env())
    }

    pub fn with_formula_engine(mut self, engine: Arc<dyn FormulaEngine>) -> Self {
        self.formula_engine = engine;
        self
    }

    pub fn with_el_provider(mut self, provider: Arc<dyn ElProvider>) -> Self {
        self.el_provider = provider;
        self
    }

    pub fn with_script_registry(mut self, registry: Arc<dyn ScriptBackendRegistry>) -> Self {
        self.script_registry = registry;
        self
    }

    /// Lookup serving the global prelude (deployment unit)
    pub fn with_global_resources(mut self, lookup: Arc<dyn ResourceLookup>) -> Self {
        self.global_resources = Some(lookup);
        self
    }

    /// Lookup serving the application prelude (hosting context)
    pub fn with_application_resources(mut self, lookup: Arc<dyn ResourceLookup>) -> Self {
        self.application_resources = Some(lookup);
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn formula_engine(&self) -> Arc<dyn FormulaEngine> {
        self.formula_engine.clone()
    }

    pub fn el_provider(&self) -> Arc<dyn ElProvider> {
        self.el_provider.clone()
    }

    pub fn script_registry(&self) -> Arc<dyn ScriptBackendRegistry> {
        self.script_registry.clone()
    }

    /// Load the prelude fragments from the configured lookups
    pub fn load_prelude(&self) -> ScriptPrelude {
        ScriptPrelude::load(
            self.global_resources.as_deref(),
            &self.config.global_prelude_resource,
            self.application_resources.as_deref(),
            &self.config.application_prelude_resource,
        )
    }

    /// Build the evaluation handler
    pub fn build_handler(&self) -> ExpressionEvaluationHandler {
        ExpressionEvaluationHandler::new(self)
    }
}

impl Default for EngineConfiguration {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}

impl fmt::Debug for EngineConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfiguration")
            .field("config", &self.config)
            .field("global_resources", &self.global_resources.is_some())
            .field("application_resources", &self.application_resources.is_some())
            .finish_non_exhaustive()
    }
}
