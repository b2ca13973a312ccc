//! Table model and context validation.

use std::collections::{BTreeMap, BTreeSet};

use crate::concepts::Concept;
use crate::context::Context;
use crate::errors::{Error, Result};
use crate::utils::name_utils::local_name;

/// A hypercube: the axes a context must use, the line items it governs and
/// the contexts stored for it so far.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    axes: BTreeMap<String, Concept>,
    line_items: BTreeSet<String>,
    contexts: Vec<Context>,
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        axes: impl IntoIterator<Item = Concept>,
        line_items: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            name: name.into(),
            axes: axes
                .into_iter()
                .map(|axis| (axis.name().to_string(), axis))
                .collect(),
            line_items: line_items.into_iter().collect(),
            contexts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axes(&self) -> &BTreeMap<String, Concept> {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&Concept> {
        self.axes.get(name)
    }

    pub fn line_items(&self) -> &BTreeSet<String> {
        &self.line_items
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Axes every context of this table must supply.
    pub fn required_axes(&self) -> impl Iterator<Item = &Concept> {
        self.axes.values().filter(|axis| axis.is_required_axis())
    }

    pub(crate) fn add_axis(&mut self, axis: Concept) {
        self.axes.insert(axis.name().to_string(), axis);
    }

    pub(crate) fn add_line_item(&mut self, name: String) {
        self.line_items.insert(name);
    }

    /// Checks a context's axis values against the table's axes.
    pub fn is_valid_context(&self, context: &Context) -> Result<()> {
        for (name, axis) in &self.axes {
            match context.axes().get(name) {
                None if axis.is_required_axis() => {
                    return Err(Error::Context(format!(
                        "Missing required axis '{}' for table '{}'",
                        name, self.name
                    )));
                }
                None => {}
                Some(value) if !axis.accepts_axis_value(value) => {
                    return Err(Error::Context(format!(
                        "Value '{}' is not in the domain of axis '{}'",
                        value, name
                    )));
                }
                Some(_) => {}
            }
        }

        if let Some(extra) = context
            .axes()
            .keys()
            .find(|name| !self.axes.contains_key(*name))
        {
            return Err(Error::Context(format!(
                "Unexpected axis '{}' for table '{}'",
                extra, self.name
            )));
        }

        Ok(())
    }

    /// Rewrites closed-domain axis values to the member names they match, so
    /// `InverterPowerLevel50PercentMember` and its prefixed form are one value.
    pub fn normalize_context(&self, mut context: Context) -> Context {
        for (name, value) in context.axes_mut().iter_mut() {
            if let Some(member) = self
                .axes
                .get(name)
                .and_then(|axis| axis.canonical_member(value))
            {
                *value = member.to_string();
            }
        }
        context
    }

    /// The stored context equal to `context`, if any.
    pub fn find_context(&self, context: &Context) -> Option<&Context> {
        let context = self.normalize_context(context.clone());
        self.contexts.iter().find(|stored| **stored == context)
    }

    /// Returns the stored equal context, or assigns the next id to `context`
    /// and stores it.
    pub fn store_context(&mut self, context: Context) -> Context {
        let mut context = self.normalize_context(context);
        if let Some(stored) = self.find_context(&context) {
            return stored.clone();
        }
        context.assign_id(format!("{}_{}", local_name(&self.name), self.contexts.len()));
        self.contexts.push(context.clone());
        context
    }
}
