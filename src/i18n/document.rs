//! Parsed content bundles.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One parsed JSON bundle, or any subtree of one.
///
/// Content is strings and nested objects. Any other JSON value (numbers,
/// booleans, arrays, null) is kept as `Other` so the rest of the bundle stays
/// usable; only lookups that land on it fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentDocument {
    Leaf(String),
    Node(BTreeMap<String, ContentDocument>),
    Other(Value),
}

impl ContentDocument {
    /// Parse a bundle body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ContentDocument::Leaf(text) => Some(text),
            ContentDocument::Node(_) | ContentDocument::Other(_) => None,
        }
    }

    /// Direct child named `segment`, if this is a node that has one.
    pub fn child(&self, segment: &str) -> Option<&ContentDocument> {
        match self {
            ContentDocument::Node(children) => children.get(segment),
            ContentDocument::Leaf(_) | ContentDocument::Other(_) => None,
        }
    }
}

impl From<&str> for ContentDocument {
    fn from(text: &str) -> Self {
        ContentDocument::Leaf(text.to_string())
    }
}
