//! Tables (hypercubes): axis sets, allowed line items and stored contexts.

mod table_model;
mod table_registry;

pub use table_model::Table;
pub use table_registry::TableRegistry;
