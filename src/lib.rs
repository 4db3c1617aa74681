//! # kenmerk-flatten
//!
//! Reduces the DUO RIO "Beheren Onderwijsorganisatie" XSD into a flat mapping
//! from entity name to attribute list, for consumption by the RIO mapper.
//!
//! The schema models entities through `complexContent/extension` chains and
//! attaches "kenmerken" (characteristics) through companion
//! `Kenmerkwaardenbereik_<Entity>` types. This crate walks those chains,
//! merges inherited attributes, normalizes cardinalities and substitutes the
//! characteristic placeholders, producing one ordered list per entity.
//!
//! ## Example
//!
//! ```rust,ignore
//! use kenmerk_flatten::{assemble, default_targets, Loader, ResolveContext};
//!
//! let schema = Loader::new().load_file("resources/DUO_RIO_Beheren_OnderwijsOrganisatie_V4.xsd")?;
//! let mut ctx = ResolveContext::new(&schema);
//! ctx.resolve_all()?;
//! let mapping = assemble(&mut ctx, &default_targets())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub mod conventions;
pub mod documents;
pub mod loaders;

pub mod model;
pub mod resolver;
pub mod flatten;

pub mod assembler;
pub mod output;

// Re-exports for convenience
pub use assembler::{assemble, default_targets, EntityMapping, Target};
pub use error::{Error, Result};
pub use flatten::flatten;
pub use loaders::{LoadedSchema, Loader};
pub use model::{AttributeDescriptor, AttributeList, Cardinality};
pub use output::{render, OutputFormat};
pub use resolver::ResolveContext;

/// Version of the kenmerk-flatten library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema location the conversion reads by default
pub const DEFAULT_SCHEMA_PATH: &str = "resources/DUO_RIO_Beheren_OnderwijsOrganisatie_V4.xsd";
