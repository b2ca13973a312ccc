//! Contexts - entity, period and axis values identifying where a fact applies.

mod context_model;


pub use context_model::{Context, ContextBuilder, Duration, Period};
