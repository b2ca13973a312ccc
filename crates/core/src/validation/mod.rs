//! Value validation - per-datatype coercion and checks.

mod validator;
mod value_type;


pub use validator::{ValidationOutcome, ValueValidator};
pub use value_type::{UnitRequirement, ValueType};
