//! Characteristic flattening
//!
//! A resolved entity carries its characteristic fields inline (injected from the
//! companion characteristic-range type) plus a placeholder marking where they
//! belong. Flattening moves the characteristic fields to the placeholder and
//! drops duplicates.

use crate::model::{AttributeDescriptor, AttributeList};
use indexmap::IndexSet;

/// Substitute characteristic placeholders and deduplicate.
///
/// Characteristic fields only survive through a placeholder; without one they
/// are dropped. First occurrence wins when deduplicating.
pub fn flatten(attributes: &[AttributeDescriptor]) -> AttributeList {
    let (characteristics, rest): (Vec<_>, Vec<_>) = attributes
        .iter()
        .partition(|descriptor| descriptor.is_characteristic());

    let mut flattened = IndexSet::with_capacity(rest.len());
    for descriptor in rest {
        match descriptor {
            AttributeDescriptor::CharacteristicList => {
                flattened.extend(characteristics.iter().map(|c| (*c).clone()));
            }
            other => {
                flattened.insert(other.clone());
            }
        }
    }

    flattened.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cardinality;

    fn plain(name: &str) -> AttributeDescriptor {
        AttributeDescriptor::field(name, false, Cardinality::Required, "string")
    }

    fn kenmerk(name: &str) -> AttributeDescriptor {
        AttributeDescriptor::field(name, true, Cardinality::Optional, "string")
    }

    #[test]
    fn test_placeholder_is_substituted() {
        let list = vec![
            plain("code"),
            kenmerk("x"),
            kenmerk("y"),
            AttributeDescriptor::CharacteristicList,
            plain("naam"),
        ];

        assert_eq!(
            flatten(&list),
            vec![plain("code"), kenmerk("x"), kenmerk("y"), plain("naam")]
        );
    }

    #[test]
    fn test_characteristics_without_placeholder_are_dropped() {
        let list = vec![plain("code"), kenmerk("x")];
        assert_eq!(flatten(&list), vec![plain("code")]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let list = vec![
            kenmerk("x"),
            kenmerk("x"),
            AttributeDescriptor::CharacteristicList,
            AttributeDescriptor::CharacteristicList,
            plain("code"),
            plain("code"),
        ];

        assert_eq!(flatten(&list), vec![kenmerk("x"), plain("code")]);
    }

    #[test]
    fn test_choice_is_kept_as_is() {
        let choice = AttributeDescriptor::Choice(vec![kenmerk("x"), plain("a")]);
        assert_eq!(flatten(&[choice.clone()]), vec![choice]);
    }

    #[test]
    fn test_empty() {
        assert!(flatten(&[]).is_empty());
    }
}
