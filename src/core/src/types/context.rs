//! Variable context consulted by every backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Read-only variable bindings for a single evaluation call
///
/// Backends receive `&VariableContext` and cannot mutate or retain it past
/// the call. The variables are held as one JSON object so the whole context
/// can be handed to scripts by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct VariableContext {
    // always a `Value::Object`
    object: Value,
}

impl VariableContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::from(Map::new())
    }

    /// Create a context holding exactly one variable
    pub fn single<S: Into<String>, V: Into<Value>>(name: S, value: V) -> Self {
        Self::new().with_variable(name, value)
    }

    /// Merge several contexts; a name defined in an earlier context shadows later ones
    pub fn composite<I>(contexts: I) -> Self
    where
        I: IntoIterator<Item = VariableContext>,
    {
        let mut variables = Map::new();
        for context in contexts {
            for (name, value) in Map::from(context) {
                variables.entry(name).or_insert(value);
            }
        }
        Self::from(variables)
    }

    /// Add a variable (builder style)
    pub fn with_variable<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        if let Value::Object(variables) = &mut self.object {
            variables.insert(name.into(), value.into());
        }
        self
    }

    /// Look up a variable by name
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.object.get(name)
    }

    /// Check whether a variable is defined
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Names of all defined variables
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    /// Iterate over all variables
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.object
            .as_object()
            .into_iter()
            .flat_map(|variables| variables.iter().map(|(k, v)| (k.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.object.as_object().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole context as a JSON object, borrowed
    pub fn as_value(&self) -> &Value {
        &self.object
    }

    /// Owned copy of the context as a JSON object
    pub fn to_object(&self) -> Value {
        self.object.clone()
    }
}

impl Default for VariableContext {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for VariableContext {
    fn from(variables: Map<String, Value>) -> Self {
        Self {
            object: Value::Object(variables),
        }
    }
}

impl From<VariableContext> for Map<String, Value> {
    fn from(context: VariableContext) -> Self {
        match context.object {
            Value::Object(variables) => variables,
            _ => Map::new(),
        }
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for VariableContext {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self::from(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl From<HashMap<String, Value>> for VariableContext {
    fn from(variables: HashMap<String, Value>) -> Self {
        variables.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_creation() {
        let ctx = VariableContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.resolve("a"), None);
    }

    #[test]
    fn test_context_builder() {
        let ctx = VariableContext::new()
            .with_variable("a", 2)
            .with_variable("name", "alice");

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.resolve("a"), Some(&json!(2)));
        assert!(ctx.contains("name"));
        assert!(!ctx.contains("b"));
    }

    #[test]
    fn test_composite_shadows_later_contexts() {
        let first = VariableContext::single("a", 1);
        let second = VariableContext::new().with_variable("a", 100).with_variable("b", 2);

        let ctx = VariableContext::composite([first, second]);
        assert_eq!(ctx.resolve("a"), Some(&json!(1)));
        assert_eq!(ctx.resolve("b"), Some(&json!(2)));
    }

    #[test]
    fn test_to_object() {
        let ctx: VariableContext = [("x", json!(true))].into_iter().collect();
        assert_eq!(ctx.to_object(), json!({"x": true}));
    }

    #[test]
    fn test_as_value_borrows_the_context() {
        let ctx = VariableContext::new().with_variable("a", 1).with_variable("b", "two");
        assert_eq!(ctx.as_value(), &json!({"a": 1, "b": "two"}));
        assert!(std::ptr::eq(ctx.as_value().get("a").unwrap(), ctx.resolve("a").unwrap()));
    }

    #[test]
    fn test_serialize_as_plain_object() {
        let ctx = VariableContext::single("a", 2);
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({"a": 2}));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let ctx: VariableContext = serde_json::from_value(json!({"a": 2, "b": 3})).unwrap();
        assert_eq!(ctx.resolve("b"), Some(&json!(3)));
    }
}
