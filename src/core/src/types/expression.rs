//! Expression objects owning their compiled artifact slots

use crate::cache::CompiledSlot;
use crate::traits::{CompiledScript, ElExpression};
use std::fmt;

/// An expression from a decision model
///
/// The text is immutable. Compiled artifacts are cached per object: two
/// expressions with identical text never share an artifact. Share an
/// expression across threads by reference or through an `Arc`.
pub struct Expression {
    id: Option<String>,
    name: Option<String>,
    language: Option<String>,
    text: Option<String>,
    el_slot: CompiledSlot<dyn ElExpression>,
    script_slot: CompiledSlot<dyn CompiledScript>,
}

impl Expression {
    /// Create an expression from its source text
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self::from_text(Some(text.into()))
    }

    /// Create an expression without text; it always evaluates to nothing
    pub fn empty() -> Self {
        Self::from_text(None)
    }

    fn from_text(text: Option<String>) -> Self {
        Self {
            id: None,
            name: None,
            language: None,
            text,
            el_slot: CompiledSlot::new(),
            script_slot: CompiledSlot::new(),
        }
    }

    /// Set the model element id
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the model element name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the language overriding the engine default
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Source text, `None` if absent or blank
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.trim().is_empty())
    }

    /// Slot holding the parsed interpolated expression
    pub fn el_slot(&self) -> &CompiledSlot<dyn ElExpression> {
        &self.el_slot
    }

    /// Slot holding the compiled script
    pub fn script_slot(&self) -> &CompiledSlot<dyn CompiledScript> {
        &self.script_slot
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("id", &self.id)
            .field("language", &self.language)
            .field("text", &self.text)
            .field("el_slot", &self.el_slot)
            .field("script_slot", &self.script_slot)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_builder() {
        let expr = Expression::new("a + b")
            .with_id("input1")
            .with_name("Sum")
            .with_language("juel");

        assert_eq!(expr.text(), Some("a + b"));
        assert_eq!(expr.id(), Some("input1"));
        assert_eq!(expr.name(), Some("Sum"));
        assert_eq!(expr.language(), Some("juel"));
        assert!(!expr.el_slot().is_populated());
        assert!(!expr.script_slot().is_populated());
    }

    #[test]
    fn test_blank_text_is_absent() {
        assert_eq!(Expression::new("").text(), None);
        assert_eq!(Expression::new("  \n").text(), None);
        assert_eq!(Expression::empty().text(), None);
    }

    #[test]
    fn test_expression_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expression>();
    }
}
