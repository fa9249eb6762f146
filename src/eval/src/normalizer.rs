//! Text normalization before dispatch
//!
//! Interpolated-language text is wrapped in `${...}` unless it already
//! starts with a delimiter. Script text gets the prelude fragments prepended:
//! global fragment, then application fragment, then the expression.

use dmn_eval_core::types::is_interpolated_language;
use dmn_eval_core::{Expression, ResourceLookup};
use std::borrow::Cow;
use tracing::debug;

/// Default name of the deployment-wide prelude resource
pub const GLOBAL_PRELUDE_RESOURCE: &str = "dmnGlobal.js";

/// Default name of the application prelude resource
pub const APPLICATION_PRELUDE_RESOURCE: &str = "dmn.js";

/// Check whether text already starts with an interpolation delimiter
pub fn is_delimited(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with("${") || text.starts_with("#{")
}

/// Prelude fragments prepended to every script expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptPrelude {
    global: String,
    application: String,
}

impl ScriptPrelude {
    /// Create a prelude from already loaded fragments
    pub fn new<G: Into<String>, A: Into<String>>(global: G, application: A) -> Self {
        Self {
            global: global.into(),
            application: application.into(),
        }
    }

    /// Load both fragments
    ///
    /// The global fragment comes from the deployment-unit lookup, the
    /// application fragment from the hosting-context lookup. A missing lookup,
    /// a missing resource or a failing lookup all yield an empty fragment.
    pub fn load(
        global: Option<&dyn ResourceLookup>,
        global_name: &str,
        application: Option<&dyn ResourceLookup>,
        application_name: &str,
    ) -> Self {
        Self {
            global: load_fragment(global, global_name),
            application: load_fragment(application, application_name),
        }
    }

    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.application.is_empty()
    }

    /// Prepend the fragments to script text
    pub fn augment<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_empty() {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(format!("{}{}{}", self.global, self.application, text))
        }
    }
}

fn load_fragment(lookup: Option<&dyn ResourceLookup>, name: &str) -> String {
    let Some(lookup) = lookup else {
        debug!("No resource lookup for prelude '{}'", name);
        return String::new();
    };

    match lookup.find_resource(name) {
        Ok(Some(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        Ok(None) => {
            debug!("Prelude resource '{}' not found", name);
            String::new()
        }
        Err(e) => {
            debug!("Prelude resource '{}' unavailable: {}", name, e);
            String::new()
        }
    }
}

/// Resolves raw expression text into the form each language expects
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    prelude: ScriptPrelude,
}

impl TextNormalizer {
    pub fn new(prelude: ScriptPrelude) -> Self {
        Self { prelude }
    }

    pub fn prelude(&self) -> &ScriptPrelude {
        &self.prelude
    }

    /// Text to evaluate for `language`, `None` if the expression has no text
    ///
    /// Only the interpolated language is rewritten; a blank language leaves
    /// the text untouched and is rejected later by classification.
    pub fn resolve_text<'e>(&self, expression: &'e Expression, language: &str) -> Option<Cow<'e, str>> {
        let text = expression.text()?;
        if is_interpolated_language(language).unwrap_or(false) && !is_delimited(text) {
            Some(Cow::Owned(format!("${{{}}}", text)))
        } else {
            Some(Cow::Borrowed(text))
        }
    }

    /// Script text with the prelude fragments prepended
    pub fn augment_script<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.prelude.augment(text)
    }
}
