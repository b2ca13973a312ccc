use crate::context::ContextBuilder;
use crate::document::{FactOptions, FactValue};
use crate::errors::{Error, Result, ValidationErrors};

/// A fact as read from either wire format, ready for `Document::set`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireFact {
    pub concept: String,
    pub value: FactValue,
    pub context: ContextBuilder,
    /// Unit as written (an id or a measure such as `iso4217:USD`), accuracy
    /// and fact id
    pub options: FactOptions,
}

impl WireFact {
    pub fn id(&self) -> Option<String> {
        self.options.id.clone()
    }
}

/// Facts read from a document plus every fact that could not be read.
#[derive(Debug, Default)]
pub(crate) struct WireDocument {
    pub facts: Vec<WireFact>,
    pub issues: ValidationErrors,
}

impl WireDocument {
    pub fn reject(&mut self, fact_id: Option<&str>, error: Error) {
        self.issues.push(fact_id.map(str::to_string), error);
    }
}

/// Parses an optional `decimals`/`precision` attribute.
pub(crate) fn parse_accuracy(name: &str, value: Option<&str>) -> Result<Option<i32>> {
    value
        .map(|text| {
            text.trim()
                .parse::<i32>()
                .map_err(|_| Error::Type(format!("'{}' is not a valid {} value", text, name)))
        })
        .transpose()
}
