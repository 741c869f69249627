// crates/opensyde-halc/src/xml_path.rs

//! Explicit location of a node inside a HALC document, used as error context.

use std::fmt;

/// A slash separated node path such as `opensyde-HALC-description/domain[DI]/channels`.
///
/// Paths are built while descending and never mutated in place, so error
/// messages always describe the node that was being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlPath(String);

impl XmlPath {
    pub(crate) fn root(name: &str) -> Self {
        XmlPath(name.to_string())
    }

    pub(crate) fn child(&self, name: &str) -> Self {
        XmlPath(format!("{}/{}", self.0, name))
    }

    /// Child addressed by position, e.g. `parameter-struct[2]`.
    pub(crate) fn indexed(&self, name: &str, index: usize) -> Self {
        XmlPath(format!("{}/{}[{}]", self.0, name, index))
    }

    /// Child addressed by key, e.g. `domain[DI]`.
    pub(crate) fn keyed(&self, name: &str, key: &str) -> Self {
        XmlPath(format!("{}/{}[{}]", self.0, name, key))
    }
}

impl fmt::Display for XmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
