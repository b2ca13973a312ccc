//! Fact documents - the fact store of one entrypoint, its defaults and its
//! XML/JSON emitters.

mod document_config;
mod document_model;
mod document_writer;
pub(crate) mod fact_model;

#[cfg(test)]
mod document_tests;

pub use document_config::DocumentConfig;
pub use document_model::Document;
pub use fact_model::{Accuracy, Fact, FactOptions, FactValue};
