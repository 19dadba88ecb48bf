//! Dotted column paths.

use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

/// Sequence of field names leading from the message root to a node.
///
/// The message name itself is not part of the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ColumnPath(Vec<String>);

impl ColumnPath {
    pub fn new(parts: Vec<String>) -> Self {
        Self(parts)
    }

    /// The empty path naming the message root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Return a new path extended by `name`.
    pub fn child(&self, name: &str) -> Self {
        let mut parts = Vec::with_capacity(self.0.len() + 1);
        parts.extend(self.0.iter().cloned());
        parts.push(name.to_string());
        Self(parts)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Join the path segments with `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.0.join(sep)
    }
}

impl From<Vec<String>> for ColumnPath {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<&[&str]> for ColumnPath {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&str> for ColumnPath {
    /// Parse a dot-separated path. The empty string is the root.
    fn from(value: &str) -> Self {
        Self(
            value
                .split('.')
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl Deref for ColumnPath {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ColumnPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.join("."))
        }
    }
}
