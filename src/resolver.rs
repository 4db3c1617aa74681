//! Complex-type reduction
//!
//! [`ResolveContext`] turns complexType nodes into [`AttributeList`]s. Resolving,
//! reducing and simplifying call each other recursively: an extension resolves its
//! base type, which may extend another type, and so on. The schema is expected to
//! be acyclic; a type that is requested again while its own reduction is still
//! running is reported as [`Error::Cycle`].
//!
//! Every reduced type is cached by name, so a type shared by several subtypes is
//! reduced exactly once per context.

use crate::conventions::{
    characteristic_type_for, is_characteristic_type, is_request_type, local_part, xsd_attrs,
    xsd_elements, CHARACTERISTIC_MARKER_TYPE,
};
use crate::documents::Element;
use crate::error::{Error, Result, ShapeError};
use crate::loaders::{ElementTypeMap, LoadedSchema, RawTypeRegistry};
use crate::model::{AttributeDescriptor, AttributeList, Cardinality};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The complex type whose sequence is being simplified
#[derive(Debug, Clone, Copy)]
pub struct OwningType<'a> {
    /// Declared type name
    pub name: &'a str,
    /// Whether the type is a characteristic-range type
    pub kenmerk: bool,
    /// `abstract="true"` on the complexType
    pub is_abstract: bool,
}

impl<'a> OwningType<'a> {
    fn of(name: &'a str, node: &Element) -> Self {
        Self {
            name,
            kenmerk: is_characteristic_type(name),
            is_abstract: node.get_attribute(xsd_attrs::ABSTRACT) == Some("true"),
        }
    }
}

/// Kinds of node that can appear inside a sequence
enum SequenceMember<'a> {
    Choice(&'a Element),
    Element(&'a Element),
    Other(&'a Element),
}

impl<'a> SequenceMember<'a> {
    fn classify(node: &'a Element) -> Self {
        match node.local_name() {
            xsd_elements::CHOICE => SequenceMember::Choice(node),
            xsd_elements::ELEMENT => SequenceMember::Element(node),
            _ => SequenceMember::Other(node),
        }
    }
}

fn shape_error(message: &str, owner: &str, node: &Element) -> Error {
    ShapeError::new(message)
        .with_type(owner)
        .with_node(node.to_xml())
        .into()
}

/// Resolution state for one pass over a schema
#[derive(Debug)]
pub struct ResolveContext<'s> {
    types: &'s RawTypeRegistry,
    element_types: &'s ElementTypeMap,
    cache: HashMap<String, AttributeList>,
    in_progress: HashSet<String>,
    reductions: HashMap<String, usize>,
}

impl<'s> ResolveContext<'s> {
    /// Create a context over a loaded schema
    pub fn new(schema: &'s LoadedSchema) -> Self {
        Self::from_tables(&schema.types, &schema.element_types)
    }

    /// Create a context over explicit lookup tables
    pub fn from_tables(types: &'s RawTypeRegistry, element_types: &'s ElementTypeMap) -> Self {
        Self {
            types,
            element_types,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
            reductions: HashMap::new(),
        }
    }

    /// Resolve a complex type by name.
    ///
    /// Names that are not in the registry resolve to an empty list.
    pub fn resolve(&mut self, name: &str) -> Result<AttributeList> {
        if let Some(attributes) = self.cache.get(name) {
            debug!(name, "cache hit");
            return Ok(attributes.clone());
        }

        let types = self.types;
        let Some(node) = types.get(name) else {
            debug!(name, "type not in registry");
            return Ok(Vec::new());
        };

        if !self.in_progress.insert(name.to_string()) {
            return Err(Error::Cycle(name.to_string()));
        }
        let result = self.reduce(node);
        self.in_progress.remove(name);
        let attributes = result?;

        *self.reductions.entry(name.to_string()).or_default() += 1;
        debug!(name, attributes = attributes.len(), "reduced");
        self.cache.insert(name.to_string(), attributes.clone());
        Ok(attributes)
    }

    /// Resolve every complex type in the registry, in document order.
    ///
    /// Returns the number of types resolved. Fails on the first shape violation.
    pub fn resolve_all(&mut self) -> Result<usize> {
        let types = self.types;
        for name in types.keys() {
            self.resolve(name)?;
        }
        Ok(types.len())
    }

    /// How many times `name` was reduced (0 or 1 for a healthy cache)
    pub fn reduction_count(&self, name: &str) -> usize {
        self.reductions.get(name).copied().unwrap_or(0)
    }

    /// Resolved attributes of `name`, if it has been resolved
    pub fn cached(&self, name: &str) -> Option<&AttributeList> {
        self.cache.get(name)
    }

    /// Reduce a complexType node to its attribute list.
    ///
    /// Inherited attributes come first, then the characteristics of the companion
    /// characteristic-range type, then the type's own sequence.
    pub fn reduce(&mut self, complex_type: &Element) -> Result<AttributeList> {
        let name = complex_type
            .get_attribute(xsd_attrs::NAME)
            .ok_or_else(|| Error::MissingName(complex_type.to_xml()))?;

        if is_request_type(name) {
            return Ok(Vec::new());
        }

        let owner = OwningType::of(name, complex_type);
        let child = match complex_type.children.as_slice() {
            [] => return Ok(Vec::new()),
            [child] => child,
            _ => {
                return Err(shape_error(
                    "complexType has more than one structural child",
                    name,
                    complex_type,
                ))
            }
        };

        match child.local_name() {
            xsd_elements::SEQUENCE => self.reduce_sequence(child, owner),
            xsd_elements::COMPLEX_CONTENT => self.reduce_complex_content(child, owner),
            _ => Err(shape_error(
                "expected a sequence or complexContent",
                name,
                child,
            )),
        }
    }

    fn reduce_complex_content(
        &mut self,
        content: &Element,
        owner: OwningType<'_>,
    ) -> Result<AttributeList> {
        let extension = match content.children.as_slice() {
            [ext] if ext.local_name() == xsd_elements::EXTENSION => ext,
            _ => {
                return Err(shape_error(
                    "complexContent must hold exactly one extension",
                    owner.name,
                    content,
                ))
            }
        };
        let base = extension
            .get_attribute(xsd_attrs::BASE)
            .ok_or_else(|| shape_error("extension without a base", owner.name, extension))?;

        let mut attributes = self.resolve(local_part(base))?;
        attributes.extend(self.resolve(&characteristic_type_for(owner.name))?);

        match extension.children.as_slice() {
            [] => {}
            [seq] if seq.local_name() == xsd_elements::SEQUENCE => {
                attributes.extend(self.reduce_sequence(seq, owner)?);
            }
            _ => {
                return Err(shape_error(
                    "extension may only hold a single sequence",
                    owner.name,
                    extension,
                ))
            }
        }

        Ok(attributes)
    }

    fn reduce_sequence(&self, sequence: &Element, owner: OwningType<'_>) -> Result<AttributeList> {
        let mut attributes = Vec::with_capacity(sequence.children.len());
        for node in &sequence.children {
            if let Some(descriptor) = self.simplify(node, owner)? {
                attributes.push(descriptor);
            }
        }
        Ok(attributes)
    }

    /// Turn one sequence member into a descriptor. `None` means the member was
    /// removed from the schema and has no descriptor.
    pub fn simplify(
        &self,
        node: &Element,
        owner: OwningType<'_>,
    ) -> Result<Option<AttributeDescriptor>> {
        match SequenceMember::classify(node) {
            SequenceMember::Choice(choice) => {
                let mut members = Vec::with_capacity(choice.children.len());
                for alternative in &choice.children {
                    if let Some(descriptor) = self.simplify(alternative, owner)? {
                        members.push(descriptor);
                    }
                }
                Ok(Some(AttributeDescriptor::Choice(members)))
            }
            SequenceMember::Element(element) => self.simplify_element(element, owner),
            SequenceMember::Other(other) => Ok(Some(AttributeDescriptor::Literal(other.to_xml()))),
        }
    }

    fn simplify_element(
        &self,
        element: &Element,
        owner: OwningType<'_>,
    ) -> Result<Option<AttributeDescriptor>> {
        let type_name = element.get_attribute(xsd_attrs::TYPE);
        if type_name.map(local_part) == Some(CHARACTERISTIC_MARKER_TYPE) {
            return Ok(Some(AttributeDescriptor::CharacteristicList));
        }

        let name = element.get_attribute(xsd_attrs::NAME);
        let max_occurs = element.get_attribute(xsd_attrs::MAX_OCCURS);
        if name.is_none() && type_name.is_none() && max_occurs == Some("0") {
            debug!(owner = owner.name, node = %element.to_xml(), "dropping removed field");
            return Ok(None);
        }

        let cardinality =
            Cardinality::from_occurs(element.get_attribute(xsd_attrs::MIN_OCCURS), max_occurs)?;

        if let Some(ref_name) = element.get_attribute(xsd_attrs::REF) {
            if owner.is_abstract {
                return Ok(Some(AttributeDescriptor::Reference {
                    cardinality,
                    type_name: self.element_types.get(local_part(ref_name)).cloned(),
                    ref_name: ref_name.to_string(),
                }));
            }
        }

        Ok(Some(AttributeDescriptor::Field {
            name: name.map(str::to_string),
            kenmerk: owner.kenmerk,
            cardinality,
            type_name: type_name.map(str::to_string),
        }))
    }
}
