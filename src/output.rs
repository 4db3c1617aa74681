//! Rendering of the entity mapping
//!
//! JSON goes through serde_json. EDN is what the downstream Clojure mapper
//! reads; it is written directly from the model so that descriptor keys and
//! enumerated cardinalities come out as keywords. Everything else has the same
//! shape in both notations: ranges are `[min max]`, an unbounded max is the
//! string `"unbounded"` and a missing cardinality is `"N/A"`.

use crate::assembler::EntityMapping;
use crate::error::Result;
use crate::model::{AttributeDescriptor, Cardinality, MaxOccurs, NOT_APPLICABLE};

/// Output notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// JSON
    Json,
    /// Extensible Data Notation
    #[default]
    Edn,
}

/// Render the mapping in the given notation
pub fn render(mapping: &EntityMapping, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(mapping)?),
        OutputFormat::Json => Ok(serde_json::to_string(mapping)?),
        OutputFormat::Edn => Ok(to_edn(mapping, pretty)),
    }
}

/// Render the mapping as EDN
pub fn to_edn(mapping: &EntityMapping, pretty: bool) -> String {
    let mut out = String::new();
    out.push('{');
    for (i, (name, attributes)) in mapping.iter().enumerate() {
        if i > 0 {
            out.push_str(if pretty { "\n " } else { ", " });
        }
        write_edn_string(&mut out, name);
        out.push_str(" [");
        for (j, descriptor) in attributes.iter().enumerate() {
            if j > 0 {
                out.push_str(if pretty { "\n  " } else { " " });
            }
            write_descriptor(&mut out, descriptor);
        }
        out.push(']');
    }
    out.push('}');
    if pretty {
        out.push('\n');
    }
    out
}

fn write_descriptor(out: &mut String, descriptor: &AttributeDescriptor) {
    match descriptor {
        AttributeDescriptor::Field {
            name,
            kenmerk,
            cardinality,
            type_name,
        } => {
            out.push_str("{:name ");
            write_edn_opt_string(out, name.as_deref());
            out.push_str(&format!(", :kenmerk {}, :cardinality ", kenmerk));
            write_cardinality(out, cardinality);
            out.push_str(", :type ");
            write_edn_opt_string(out, type_name.as_deref());
            out.push('}');
        }
        AttributeDescriptor::Choice(members) => {
            out.push_str("{:choice [");
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_descriptor(out, member);
            }
            out.push_str("]}");
        }
        AttributeDescriptor::CharacteristicList => out.push_str("{:kenmerklist true}"),
        AttributeDescriptor::Reference {
            cardinality,
            type_name,
            ref_name,
        } => {
            out.push_str("{:cardinality ");
            write_cardinality(out, cardinality);
            out.push_str(", :type ");
            write_edn_opt_string(out, type_name.as_deref());
            out.push_str(", :ref ");
            write_edn_string(out, ref_name);
            out.push('}');
        }
        AttributeDescriptor::Literal(xml) => write_edn_string(out, xml),
    }
}

fn write_cardinality(out: &mut String, cardinality: &Cardinality) {
    match cardinality {
        Cardinality::NotApplicable => write_edn_string(out, NOT_APPLICABLE),
        Cardinality::Range { min, max } => {
            out.push_str(&format!("[{} ", min));
            match max {
                MaxOccurs::Bounded(_) => out.push_str(&max.to_string()),
                MaxOccurs::Unbounded => write_edn_string(out, &max.to_string()),
            }
            out.push(']');
        }
        other => {
            out.push(':');
            out.push_str(other.keyword().unwrap_or(NOT_APPLICABLE));
        }
    }
}

fn write_edn_opt_string(out: &mut String, value: Option<&str>) {
    match value {
        Some(s) => write_edn_string(out, s),
        None => out.push_str("nil"),
    }
}

fn write_edn_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
