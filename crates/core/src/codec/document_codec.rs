//! Reading and writing documents in either wire format.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use oblib_taxonomy::TaxonomyCatalog;

use super::entrypoint::infer_entrypoint;
use super::json_reader::read_json;
use super::wire_model::WireDocument;
use super::xml_reader::read_xml;
use crate::document::{Document, DocumentConfig};
use crate::errors::{Error, Result};

/// Wire format, chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Xml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("xml") | Some("xbrl") => Ok(FileFormat::Xml),
            _ => Err(Error::Parse(format!(
                "Cannot tell the format of '{}' from its extension",
                path.display()
            ))),
        }
    }
}

/// Parses, serializes and converts documents against one catalog.
///
/// Reading is not fail-fast: every fact of the input is attempted and all
/// defects come back together as [`Error::Validation`].
#[derive(Clone)]
pub struct DocumentCodec {
    catalog: Arc<dyn TaxonomyCatalog>,
    config: DocumentConfig,
}

impl DocumentCodec {
    pub fn new(catalog: Arc<dyn TaxonomyCatalog>) -> Self {
        Self::with_config(catalog, DocumentConfig::default())
    }

    /// Documents read by this codec are created with `config`.
    pub fn with_config(catalog: Arc<dyn TaxonomyCatalog>, config: DocumentConfig) -> Self {
        Self { catalog, config }
    }

    /// Entrypoint of a document with these fact concepts.
    pub fn infer_entrypoint<I, S>(&self, concepts: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        infer_entrypoint(self.catalog.as_ref(), concepts)
    }

    /// Reads an xBRL-JSON document; the entrypoint is inferred when `None`.
    pub fn from_json_str(&self, json: &str, entrypoint: Option<&str>) -> Result<Document> {
        self.build(read_json(json)?, entrypoint)
    }

    /// Reads an XBRL instance; the entrypoint is inferred when `None`.
    pub fn from_xml_str(&self, xml: &str, entrypoint: Option<&str>) -> Result<Document> {
        self.build(read_xml(xml)?, entrypoint)
    }

    pub fn from_json_file(
        &self,
        path: impl AsRef<Path>,
        entrypoint: Option<&str>,
    ) -> Result<Document> {
        let json = fs::read_to_string(path.as_ref())?;
        self.from_json_str(&json, entrypoint)
    }

    pub fn from_xml_file(
        &self,
        path: impl AsRef<Path>,
        entrypoint: Option<&str>,
    ) -> Result<Document> {
        let xml = fs::read_to_string(path.as_ref())?;
        self.from_xml_str(&xml, entrypoint)
    }

    /// Reads a file in the format its extension names.
    pub fn from_file(
        &self,
        path: impl AsRef<Path>,
        entrypoint: Option<&str>,
    ) -> Result<Document> {
        let path = path.as_ref();
        match FileFormat::from_path(path)? {
            FileFormat::Json => self.from_json_file(path, entrypoint),
            FileFormat::Xml => self.from_xml_file(path, entrypoint),
        }
    }

    pub fn to_json_string(&self, document: &Document) -> Result<String> {
        document.to_json_string()
    }

    pub fn to_xml_string(&self, document: &Document) -> Result<String> {
        document.to_xml_string()
    }

    /// Writes a document in the format the extension of `path` names.
    pub fn to_file(&self, document: &Document, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = match FileFormat::from_path(path)? {
            FileFormat::Json => self.to_json_string(document)?,
            FileFormat::Xml => self.to_xml_string(document)?,
        };
        fs::write(path, text)?;
        Ok(())
    }

    /// Reads `input` and writes it to `output`, each in the format of its
    /// extension.
    pub fn convert(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        entrypoint: Option<&str>,
    ) -> Result<()> {
        let document = self.from_file(input.as_ref(), entrypoint)?;
        self.to_file(&document, output.as_ref())?;
        debug!(
            "Converted {} to {} ({} facts)",
            input.as_ref().display(),
            output.as_ref().display(),
            document.fact_count()
        );
        Ok(())
    }

    /// Checks that a file reads cleanly.
    pub fn validate(&self, path: impl AsRef<Path>, entrypoint: Option<&str>) -> Result<()> {
        self.from_file(path, entrypoint).map(|_| ())
    }

    fn build(&self, wire: WireDocument, entrypoint: Option<&str>) -> Result<Document> {
        let WireDocument { facts, mut issues } = wire;

        let entrypoint = match entrypoint {
            Some(name) => name.to_string(),
            None => self.infer_entrypoint(facts.iter().map(|fact| fact.concept.as_str()))?,
        };
        let mut document =
            Document::with_config(Arc::clone(&self.catalog), &entrypoint, self.config.clone())?;

        for fact in facts {
            let id = fact.id();
            if let Err(err) = document.set(&fact.concept, fact.value, fact.context, fact.options) {
                issues.push(id, err);
            }
        }

        if !issues.is_empty() {
            warn!(
                "Document for '{}' has {} invalid facts",
                entrypoint,
                issues.len()
            );
        }
        issues.into_result()?;
        Ok(document)
    }
}
