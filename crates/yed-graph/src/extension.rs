//! Opaque carriers for content this library does not model.

use core::fmt;

/// A well-formed XML element kept verbatim, written back where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes on a modelled element that have no typed field, in document order.
pub type ForeignAttributes = Vec<(String, String)>;
