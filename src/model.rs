//! Attribute model produced by the reducer
//!
//! A reduced complex type is an [`AttributeList`]: an ordered list of
//! [`AttributeDescriptor`]s. Order only matters for reproducible output.

use crate::error::{Error, Result};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Ordered list of attribute descriptors
pub type AttributeList = Vec<AttributeDescriptor>;

/// Text of an unbounded `maxOccurs`, in every output notation
pub const UNBOUNDED: &str = "unbounded";

/// Upper occurrence bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// A fixed upper bound
    Bounded(u32),
    /// `maxOccurs="unbounded"`
    Unbounded,
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxOccurs::Bounded(n) => write!(f, "{}", n),
            MaxOccurs::Unbounded => f.write_str(UNBOUNDED),
        }
    }
}

/// Normalized cardinality of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// (0,1)
    Optional,
    /// (1,1)
    Required,
    /// (0,99) or (0,999)
    ZeroOrMore,
    /// (1,999)
    OneOrMore,
    /// No maxOccurs was declared
    NotApplicable,
    /// Any other pair, kept as declared
    Range {
        /// minOccurs
        min: u32,
        /// maxOccurs
        max: MaxOccurs,
    },
}

impl Cardinality {
    /// Derive the cardinality from raw `minOccurs`/`maxOccurs` attribute values.
    ///
    /// Without a `maxOccurs` the cardinality is not applicable, whatever
    /// `minOccurs` says. A missing `minOccurs` takes the XSD default of 1.
    pub fn from_occurs(min_occurs: Option<&str>, max_occurs: Option<&str>) -> Result<Self> {
        let max = match max_occurs {
            None => return Ok(Cardinality::NotApplicable),
            Some(UNBOUNDED) => MaxOccurs::Unbounded,
            Some(value) => MaxOccurs::Bounded(parse_bound("maxOccurs", value)?),
        };
        let min = match min_occurs {
            Some(value) => parse_bound("minOccurs", value)?,
            None => 1,
        };

        Ok(Self::from_pair(min, max))
    }

    /// Map a (min,max) pair onto the fixed enumeration, or keep it as a range
    pub fn from_pair(min: u32, max: MaxOccurs) -> Self {
        match (min, max) {
            (0, MaxOccurs::Bounded(1)) => Cardinality::Optional,
            (1, MaxOccurs::Bounded(1)) => Cardinality::Required,
            (0, MaxOccurs::Bounded(99)) | (0, MaxOccurs::Bounded(999)) => Cardinality::ZeroOrMore,
            (1, MaxOccurs::Bounded(999)) => Cardinality::OneOrMore,
            (min, max) => Cardinality::Range { min, max },
        }
    }

    /// Keyword form of the enumerated values, `None` for ranges and N/A
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Cardinality::Optional => Some("optional"),
            Cardinality::Required => Some("required"),
            Cardinality::ZeroOrMore => Some("zero_or_more"),
            Cardinality::OneOrMore => Some("one_or_more"),
            Cardinality::NotApplicable | Cardinality::Range { .. } => None,
        }
    }
}

fn parse_bound(attribute: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| Error::InvalidOccurs {
        attribute,
        value: value.to_string(),
    })
}

/// Text used for [`Cardinality::NotApplicable`] in output
pub const NOT_APPLICABLE: &str = "N/A";

impl Serialize for MaxOccurs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MaxOccurs::Bounded(n) => serializer.serialize_u32(*n),
            MaxOccurs::Unbounded => serializer.serialize_str(UNBOUNDED),
        }
    }
}

impl Serialize for Cardinality {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cardinality::Range { min, max } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(min)?;
                seq.serialize_element(max)?;
                seq.end()
            }
            Cardinality::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
            other => serializer.serialize_str(other.keyword().unwrap_or(NOT_APPLICABLE)),
        }
    }
}

/// One entry of a reduced complex type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeDescriptor {
    /// A plain field
    Field {
        /// Element name; absent for un-named, non-abstract references
        name: Option<String>,
        /// Set when the owning type is a characteristic-range type
        kenmerk: bool,
        /// Normalized cardinality
        cardinality: Cardinality,
        /// Declared type, verbatim
        type_name: Option<String>,
    },
    /// Mutually exclusive alternatives
    Choice(Vec<AttributeDescriptor>),
    /// Placeholder for the owning entity's characteristic fields
    CharacteristicList,
    /// Reference to another top-level element, not expanded
    Reference {
        /// Normalized cardinality
        cardinality: Cardinality,
        /// Type declared for the referenced element
        type_name: Option<String>,
        /// Referenced element name
        ref_name: String,
    },
    /// A sequence member this model does not interpret, kept as its XML
    Literal(String),
}

impl AttributeDescriptor {
    /// Create a field
    pub fn field(
        name: impl Into<String>,
        kenmerk: bool,
        cardinality: Cardinality,
        type_name: impl Into<String>,
    ) -> Self {
        AttributeDescriptor::Field {
            name: Some(name.into()),
            kenmerk,
            cardinality,
            type_name: Some(type_name.into()),
        }
    }

    /// Whether this is a field belonging to a characteristic range
    pub fn is_characteristic(&self) -> bool {
        matches!(self, AttributeDescriptor::Field { kenmerk: true, .. })
    }
}

impl Serialize for AttributeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AttributeDescriptor::Field {
                name,
                kenmerk,
                cardinality,
                type_name,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("kenmerk", kenmerk)?;
                map.serialize_entry("cardinality", cardinality)?;
                map.serialize_entry("type", type_name)?;
                map.end()
            }
            AttributeDescriptor::Choice(members) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("choice", members)?;
                map.end()
            }
            AttributeDescriptor::CharacteristicList => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("kenmerklist", &true)?;
                map.end()
            }
            AttributeDescriptor::Reference {
                cardinality,
                type_name,
                ref_name,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("cardinality", cardinality)?;
                map.serialize_entry("type", type_name)?;
                map.serialize_entry("ref", ref_name)?;
                map.end()
            }
            AttributeDescriptor::Literal(xml) => serializer.serialize_str(xml),
        }
    }
}
