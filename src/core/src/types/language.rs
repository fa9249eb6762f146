//! Expression language identifiers and dispatch classification

use crate::error::{EvaluationError, Result};

/// FEEL namespace from DMN 1.1
pub const FEEL_EXPRESSION_LANGUAGE: &str = "http://www.omg.org/spec/FEEL/20140401";

/// FEEL namespace from DMN 1.2
pub const FEEL_EXPRESSION_LANGUAGE_DMN12: &str = "http://www.omg.org/spec/DMN/20180521/FEEL/";

/// FEEL namespace from DMN 1.3
pub const FEEL_EXPRESSION_LANGUAGE_DMN13: &str = "https://www.omg.org/spec/DMN/20191111/FEEL/";

/// Short FEEL alias, matched case-insensitively
pub const FEEL_EXPRESSION_LANGUAGE_ALTERNATIVE: &str = "feel";

/// Interpolated expression language, matched case-sensitively
pub const JUEL_EXPRESSION_LANGUAGE: &str = "juel";

const FEEL_PRIMARY_IDENTIFIERS: [&str; 3] = [
    FEEL_EXPRESSION_LANGUAGE,
    FEEL_EXPRESSION_LANGUAGE_DMN12,
    FEEL_EXPRESSION_LANGUAGE_DMN13,
];

/// Evaluation path selected for a language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageClass<'a> {
    /// Declarative formula language, evaluated directly
    Formula,
    /// Interpolated expression language, parsed once per expression
    Interpolated,
    /// Any other language, resolved against the script backend registry
    Script(&'a str),
}

impl<'a> LanguageClass<'a> {
    /// Classify a language identifier
    ///
    /// Order is fixed: formula identifiers first, then the interpolated
    /// identifier, otherwise the script path.
    pub fn of(language: &'a str) -> Result<Self> {
        if is_formula_language(language)? {
            Ok(LanguageClass::Formula)
        } else if is_interpolated_language(language)? {
            Ok(LanguageClass::Interpolated)
        } else {
            Ok(LanguageClass::Script(language))
        }
    }

    /// Whether expressions of this class keep a compiled artifact
    pub fn supports_caching(&self) -> bool {
        !matches!(self, LanguageClass::Formula)
    }
}

fn ensure_language(language: &str) -> Result<&str> {
    if language.trim().is_empty() {
        Err(EvaluationError::MissingLanguageIdentifier)
    } else {
        Ok(language)
    }
}

/// Check whether a language identifier names the formula language
///
/// Primary namespaces must match exactly; the short alias ignores case.
pub fn is_formula_language(language: &str) -> Result<bool> {
    let language = ensure_language(language)?;
    Ok(FEEL_PRIMARY_IDENTIFIERS.contains(&language)
        || language.eq_ignore_ascii_case(FEEL_EXPRESSION_LANGUAGE_ALTERNATIVE))
}

/// Check whether a language identifier names the interpolated expression language
pub fn is_interpolated_language(language: &str) -> Result<bool> {
    let language = ensure_language(language)?;
    Ok(language == JUEL_EXPRESSION_LANGUAGE)
}

/// Check whether a language identifier falls through to the script path
pub fn is_script_language(language: &str) -> Result<bool> {
    Ok(matches!(LanguageClass::of(language)?, LanguageClass::Script(_)))
}
