//! Naming conventions of the RIO education-organisation schema family
//!
//! None of these are XSD semantics. They are how the DUO schema authors encode
//! characteristics ("kenmerken") and request wrappers by name. They hold for the
//! V4 release; later releases may change them.

/// Prefix of a characteristic-range type. `Kenmerkwaardenbereik_Foo` lists the
/// characteristic fields that apply to entity type `Foo`.
pub const CHARACTERISTIC_TYPE_PREFIX: &str = "Kenmerkwaardenbereik_";

/// Element type marking the spot where an entity's characteristics go.
pub const CHARACTERISTIC_MARKER_TYPE: &str = "Kenmerk";

/// Suffix of request-wrapper types; those carry no entity data.
pub const REQUEST_SUFFIX: &str = "_request";

/// XSD element local names
#[allow(missing_docs)]
pub mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SEQUENCE: &str = "sequence";
    pub const CHOICE: &str = "choice";
    pub const ANNOTATION: &str = "annotation";
    pub const EXTENSION: &str = "extension";
    pub const COMPLEX_CONTENT: &str = "complexContent";
}

/// XSD attribute names
#[allow(missing_docs)]
pub mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const REF: &str = "ref";
    pub const BASE: &str = "base";
    pub const ABSTRACT: &str = "abstract";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
}

/// Name of the characteristic-range type companion to `type_name`
pub fn characteristic_type_for(type_name: &str) -> String {
    format!("{}{}", CHARACTERISTIC_TYPE_PREFIX, type_name)
}

/// Whether `type_name` is itself a characteristic-range type
pub fn is_characteristic_type(type_name: &str) -> bool {
    type_name.starts_with(CHARACTERISTIC_TYPE_PREFIX)
}

/// Whether `type_name` is a request wrapper
pub fn is_request_type(type_name: &str) -> bool {
    type_name.ends_with(REQUEST_SUFFIX)
}

/// Local part of a possibly prefixed QName value (`duo:Foo` -> `Foo`)
pub fn local_part(value: &str) -> &str {
    value.rsplit_once(':').map(|(_, local)| local).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characteristic_names() {
        assert_eq!(
            characteristic_type_for("HoOpleiding"),
            "Kenmerkwaardenbereik_HoOpleiding"
        );
        assert!(is_characteristic_type("Kenmerkwaardenbereik_HoOpleiding"));
        assert!(!is_characteristic_type("HoOpleiding"));
    }

    #[test]
    fn test_request_suffix() {
        assert!(is_request_type("aanleveren_opleidingseenheid_request"));
        assert!(!is_request_type("request_HoOpleiding"));
    }

    #[test]
    fn test_local_part() {
        assert_eq!(local_part("duo:Foo"), "Foo");
        assert_eq!(local_part("Foo"), "Foo");
    }
}
