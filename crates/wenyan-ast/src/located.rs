//! Source locations for AST nodes.

use wenyan_diagnostics::SourceLocation;

/// A value with an optional source location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Located<T> {
    pub node: T,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub loc: Option<SourceLocation>,
}

impl<T> Located<T> {
    pub fn new(node: T, loc: Option<SourceLocation>) -> Self {
        Self { node, loc }
    }

    /// A node with no location.
    pub fn bare(node: T) -> Self {
        Self { node, loc: None }
    }
}

impl<T> std::ops::Deref for Located<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}
