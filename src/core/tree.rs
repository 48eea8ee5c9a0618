//! Per-locale translation trees.
//!
//! A tree is the parsed content of one `<locale>.json` file: nested objects
//! addressed by dot paths, with strings and structured payloads at the leaves.

use std::fmt;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Kind of node a dot path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    String,
    /// Nested mapping that the resolver descends into.
    Tree,
    /// Array payload, opaque to the resolver.
    Array,
    /// Object keyed by stringified integers, opaque to the resolver.
    StructuredMap,
    /// Numbers, booleans and null.
    Scalar,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(map) if is_structured_map(map) => NodeKind::StructuredMap,
            Value::Object(_) => NodeKind::Tree,
            Value::Number(_) | Value::Bool(_) | Value::Null => NodeKind::Scalar,
        }
    }

    /// Whether the node is a complete value rather than a branch.
    pub fn is_leaf(self) -> bool {
        self != NodeKind::Tree
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::String => write!(f, "string"),
            NodeKind::Tree => write!(f, "tree"),
            NodeKind::Array => write!(f, "array"),
            NodeKind::StructuredMap => write!(f, "structured map"),
            NodeKind::Scalar => write!(f, "scalar"),
        }
    }
}

/// An object whose keys are all stringified integers, e.g. slider labels
/// keyed by threshold: `{"0": "none", "50": "some", "100": "all"}`.
///
/// Empty objects are not structured maps.
pub fn is_structured_map(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|k| k.parse::<i64>().is_ok())
}

/// Immutable content tree for a single locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTree {
    root: Map<String, Value>,
}

/// A leaf path in a tree together with the kind of node it addresses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LeafPath {
    pub path: String,
    pub kind: NodeKind,
}

impl TranslationTree {
    /// Build a tree from a parsed JSON document. The document root must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => bail!(
                "Translation root must be a JSON object, found {}",
                NodeKind::of(&other)
            ),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).context("Failed to parse translation JSON")?;
        Self::from_value(value)
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Every addressable leaf in the tree, in document order.
    ///
    /// Descends into nested mappings only; arrays and structured maps are
    /// reported as single leaves. Empty mappings produce no leaves.
    pub fn leaves(&self) -> Vec<LeafPath> {
        let mut out = Vec::new();
        collect_leaves(&self.root, String::new(), &mut out);
        out
    }
}

fn collect_leaves(map: &Map<String, Value>, prefix: String, out: &mut Vec<LeafPath>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match NodeKind::of(value) {
            NodeKind::Tree => {
                if let Value::Object(child) = value {
                    collect_leaves(child, path, out);
                }
            }
            kind => out.push(LeafPath { path, kind }),
        }
    }
}
