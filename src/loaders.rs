//! Schema loading
//!
//! Reads the schema document, strips annotations and builds the two lookup
//! tables the resolver works from.

use crate::conventions::{xsd_attrs, xsd_elements};
use crate::documents::{Document, Element};
use crate::error::{Error, Result, ShapeError};
use crate::limits::Limits;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Complex-type name -> unresolved complexType node, in document order
pub type RawTypeRegistry = IndexMap<String, Element>;

/// Top-level element name -> declared type name
pub type ElementTypeMap = HashMap<String, String>;

/// The lookup tables extracted from a schema
#[derive(Debug, Clone, Default)]
pub struct LoadedSchema {
    /// Top-level complex types
    pub types: RawTypeRegistry,
    /// Top-level element declarations
    pub element_types: ElementTypeMap,
}

/// Loader for schema documents
#[derive(Debug, Default)]
pub struct Loader {
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load a schema from a file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedSchema> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| {
            Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        info!(path = %path.display(), bytes = content.len(), "loading schema");
        self.load_bytes(&content)
    }

    /// Load a schema from a string
    pub fn load_str(&self, xml: &str) -> Result<LoadedSchema> {
        self.load_bytes(xml.as_bytes())
    }

    /// Load a schema from bytes
    pub fn load_bytes(&self, xml: &[u8]) -> Result<LoadedSchema> {
        let doc = Document::parse(xml, &self.limits)?;
        self.load_document(doc)
    }

    /// Build the lookup tables from a parsed document
    pub fn load_document(&self, doc: Document) -> Result<LoadedSchema> {
        let mut schema = doc
            .root
            .ok_or_else(|| Error::Xml("document has no root element".to_string()))?;

        if schema.local_name() != xsd_elements::SCHEMA {
            return Err(ShapeError::new("root element is not a schema")
                .with_node(Element::new(schema.name.clone()).to_xml())
                .into());
        }

        let removed = schema.remove_descendants(xsd_elements::ANNOTATION);
        debug!(removed, "stripped annotations");

        let mut loaded = LoadedSchema::default();
        for child in schema.children {
            match child.local_name() {
                xsd_elements::COMPLEX_TYPE => {
                    let name = child
                        .get_attribute(xsd_attrs::NAME)
                        .ok_or_else(|| Error::MissingName(child.to_xml()))?
                        .to_string();
                    if loaded.types.contains_key(&name) {
                        warn!(%name, "duplicate complexType, the later definition wins");
                    }
                    loaded.types.insert(name, child);
                }
                xsd_elements::ELEMENT => {
                    match (
                        child.get_attribute(xsd_attrs::NAME),
                        child.get_attribute(xsd_attrs::TYPE),
                    ) {
                        (Some(name), Some(type_name)) => {
                            loaded
                                .element_types
                                .insert(name.to_string(), type_name.to_string());
                        }
                        _ => debug!(node = %child.to_xml(), "skipping element without name or type"),
                    }
                }
                _ => {}
            }
        }

        self.limits.check_complex_types(loaded.types.len())?;
        info!(
            complex_types = loaded.types.len(),
            elements = loaded.element_types.len(),
            "schema loaded"
        );
        Ok(loaded)
    }
}
