//! Output assembly
//!
//! Resolves and flattens a fixed table of entity names, each combined with a set
//! of name suffixes, into one ordered mapping.

use crate::error::Result;
use crate::flatten::flatten;
use crate::model::AttributeList;
use crate::resolver::ResolveContext;
use indexmap::IndexMap;
use tracing::{debug, info};

/// Entity name -> flattened attributes, in target order
pub type EntityMapping = IndexMap<String, AttributeList>;

/// A group of base entity names sharing the same suffixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Base entity names
    pub entities: Vec<String>,
    /// Suffixes appended to each entity; the empty suffix is the entity itself
    pub suffixes: Vec<String>,
}

impl Target {
    /// Create a target group
    pub fn new<E, S>(entities: E, suffixes: S) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            entities: entities.into_iter().map(Into::into).collect(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A single name without suffix variants
    pub fn single(entity: impl Into<String>) -> Self {
        let entity: String = entity.into();
        Self::new([entity], [""])
    }

    /// Combined names, entity-major
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.entities.iter().flat_map(move |entity| {
            self.suffixes
                .iter()
                .map(move |suffix| format!("{}{}", entity, suffix))
        })
    }
}

/// The entities the downstream mapper consumes
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new(
            [
                "AangebodenHOOpleiding",
                "AangebodenHOOpleidingsonderdeel",
                "AangebodenParticuliereOpleiding",
            ],
            ["", "Periode", "Cohort"],
        ),
        Target::new(
            [
                "HoOpleiding",
                "HoOnderwijseenhedencluster",
                "HoOnderwijseenheid",
                "ParticuliereOpleiding",
            ],
            ["", "Periode"],
        ),
    ]
}

/// Resolve and flatten every target name.
///
/// Names missing from the schema map to an empty list.
pub fn assemble(ctx: &mut ResolveContext<'_>, targets: &[Target]) -> Result<EntityMapping> {
    let mut mapping = EntityMapping::new();
    for name in targets.iter().flat_map(|target| target.names()) {
        let resolved = ctx.resolve(&name)?;
        let flattened = flatten(&resolved);
        debug!(%name, attributes = flattened.len(), "assembled");
        mapping.insert(name, flattened);
    }
    info!(entities = mapping.len(), "mapping assembled");
    Ok(mapping)
}
