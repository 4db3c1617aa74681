//! Error types for kenmerk-flatten
//!
//! Every error here is fatal: the transform either completes or aborts on the
//! first violation. Types that are simply absent from the schema are not errors
//! and never reach this module.

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for schema loading and reduction
#[derive(Error, Debug)]
pub enum Error {
    /// The schema does not have the shape this reducer understands
    #[error("schema shape error: {0}")]
    Shape(#[from] ShapeError),

    /// A top-level complex type without a `name` attribute
    #[error("complex type without a name:\n{0}")]
    MissingName(String),

    /// A type was requested again while its own reduction was still running
    #[error("cyclic type reference through '{0}'")]
    Cycle(String),

    /// An occurrence bound that is neither a number nor `unbounded`
    #[error("invalid {attribute} value '{value}'")]
    InvalidOccurs {
        /// `minOccurs` or `maxOccurs`
        attribute: &'static str,
        /// The raw attribute value
        value: String,
    },

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unexpected node structure inside a complex type
#[derive(Debug, Clone)]
pub struct ShapeError {
    /// Error message
    pub message: String,
    /// Name of the complex type being reduced
    pub type_name: Option<String>,
    /// Serialized offending node
    pub node: Option<String>,
}

impl ShapeError {
    /// Create a new shape error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            type_name: None,
            node: None,
        }
    }

    /// Set the complex type that was being reduced
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the serialized node
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref type_name) = self.type_name {
            write!(f, " (in complexType '{}')", type_name)?;
        }

        if let Some(ref node) = self.node {
            write!(f, "\n\nNode:\n{}", node)?;
        }

        Ok(())
    }
}

impl std::error::Error for ShapeError {}
