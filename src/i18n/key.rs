//! Dotted lookup keys: `scope.path.to.value`.

use crate::i18n::ResolveError;
use std::fmt;

/// A parsed lookup key.
///
/// The first segment selects the bundle, the rest are traversal steps.
/// Segments are split on every `.`; empty inner segments are kept as-is and
/// will simply fail to match a bundle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    raw: String,
    scope: String,
    path: Vec<String>,
}

impl LookupKey {
    /// Parse a dotted key.
    ///
    /// # Errors
    /// `ResolveError::InvalidInput` if the key or its scope segment is empty.
    pub fn parse(key: &str) -> Result<Self, ResolveError> {
        if key.is_empty() {
            return Err(ResolveError::InvalidInput(
                "lookup key must not be empty".to_string(),
            ));
        }

        let mut segments = key.split('.');
        let scope = segments.next().unwrap_or_default().to_string();
        if scope.is_empty() {
            return Err(ResolveError::InvalidInput(format!(
                "lookup key '{}' has an empty scope segment",
                key
            )));
        }

        Ok(Self {
            raw: key.to_string(),
            scope,
            path: segments.map(str::to_string).collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Traversal steps after the scope, possibly empty.
    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
