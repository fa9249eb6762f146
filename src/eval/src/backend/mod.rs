//! Backend adapters, one per language class

pub mod formula;
pub mod interpolated;
pub mod script;

pub use formula::FormulaAdapter;
pub use interpolated::InterpolatedAdapter;
pub use script::ScriptAdapter;
