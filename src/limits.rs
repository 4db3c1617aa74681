//! Limits applied while loading a schema
//!
//! The whole schema is held in memory, so the loader refuses inputs that are
//! unreasonably large or deeply nested before any reduction starts.

use crate::error::{Error, Result};

/// Loading limits
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum schema file size in bytes
    pub max_xml_size: usize,

    /// Maximum number of top-level complex types
    pub max_complex_types: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 256,
            max_xml_size: 64 * 1024 * 1024, // 64 MB
            max_complex_types: 100_000,
        }
    }
}

impl Limits {
    /// Create strict limits, mostly useful in tests
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 32,
            max_xml_size: 1024 * 1024, // 1 MB
            max_complex_types: 1_000,
        }
    }

    /// Check if nesting depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if schema size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of complex types is within limits
    pub fn check_complex_types(&self, count: usize) -> Result<()> {
        if count > self.max_complex_types {
            Err(Error::LimitExceeded(format!(
                "complexType count {} exceeds maximum {}",
                count, self.max_complex_types
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_xml_depth, 256);
        assert!(limits.check_xml_depth(100).is_ok());
        assert!(limits.check_xml_depth(300).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_xml_size < Limits::default().max_xml_size);
        assert!(limits.check_xml_depth(33).is_err());
    }

    #[test]
    fn test_check_xml_size() {
        let limits = Limits::default();
        assert!(limits.check_xml_size(1024).is_ok());
        assert!(limits.check_xml_size(100 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_check_complex_types() {
        let limits = Limits::strict();
        assert!(limits.check_complex_types(1_000).is_ok());
        assert!(limits.check_complex_types(1_001).is_err());
    }
}
