//! Shared types for expression evaluation

pub mod context;
pub mod expression;
pub mod language;

// Re-export commonly used types
pub use context::VariableContext;
pub use expression::Expression;
pub use language::{
    is_formula_language, is_interpolated_language, is_script_language, LanguageClass,
    FEEL_EXPRESSION_LANGUAGE, FEEL_EXPRESSION_LANGUAGE_ALTERNATIVE,
    FEEL_EXPRESSION_LANGUAGE_DMN12, FEEL_EXPRESSION_LANGUAGE_DMN13, JUEL_EXPRESSION_LANGUAGE,
};
