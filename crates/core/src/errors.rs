//! Core error types for fact documents.
//!
//! `Document::set` fails fast with a single [`Error`]. The codecs instead scan
//! every fact of an input document and report all defects at once through
//! [`Error::Validation`].

use std::fmt;

use chrono::ParseError as ChronoParseError;
use oblib_taxonomy::CatalogError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for document operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown concept, or one that cannot carry a value in this entrypoint.
    #[error("Concept error: {0}")]
    Concept(String),

    /// Missing, extra or invalid period or axis information.
    #[error("Context error: {0}")]
    Context(String),

    /// Missing or mismatched unit.
    #[error("Unit error: {0}")]
    Unit(String),

    /// The value does not satisfy the concept's declared datatype.
    #[error("Type error: {0}")]
    Type(String),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Every defect found while reading a document.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The input text is not a well-formed document of the expected format.
    #[error("Malformed document: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Lookups that found nothing, or more than one candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Entrypoint '{0}' does not exist in the taxonomy")]
    Entrypoint(String),

    #[error("Unit '{0}' does not exist in the unit registry")]
    Unit(String),

    #[error("No entrypoint contains the concepts of this document")]
    NoEntrypoint,

    #[error("Concepts match more than one entrypoint: {}", .0.join(", "))]
    AmbiguousEntrypoint(Vec<String>),
}

/// One defect found while reading a document.
#[derive(Debug)]
pub struct FactIssue {
    /// Id of the offending fact, when the input carried one.
    pub fact_id: Option<String>,
    pub error: Error,
}

impl fmt::Display for FactIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fact_id {
            Some(id) => write!(f, "fact '{}': {}", id, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Aggregate of every defect found in one pass over a document.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    issues: Vec<FactIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fact_id: Option<String>, error: Error) {
        self.issues.push(FactIssue { fact_id, error });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[FactIssue] {
        &self.issues
    }

    /// `Ok(())` when nothing was collected, the aggregate error otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

// === From implementations for common error types ===

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Context(format!("Invalid timestamp: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(err))
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
