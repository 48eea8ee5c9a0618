//! Dot-path resolution against a single translation tree.
//!
//! Resolution walks one segment at a time through nested mappings. Arrays,
//! structured maps and strings are leaves: a path that tries to continue
//! past one of them does not resolve. A miss is an ordinary `None`, never
//! an error.

use serde_json::Value;

use crate::core::tree::{NodeKind, TranslationTree};

/// Resolve `path` (e.g. `"wizard.step3.title"`) in `tree`.
///
/// Returns the node at the final segment without filtering on its type,
/// or `None` when any segment is missing, empty, or would descend into a leaf.
pub fn resolve<'a>(tree: &'a TranslationTree, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut segments = path.split('.');
    let first = segments.next()?;
    if first.is_empty() {
        return None;
    }
    let mut current = tree.root().get(first)?;

    for segment in segments {
        if segment.is_empty() {
            return None;
        }
        current = match current {
            Value::Object(map) if NodeKind::of(current) == NodeKind::Tree => map.get(segment)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Resolve `path` and keep the result only if it is a string.
pub fn resolve_str<'a>(tree: &'a TranslationTree, path: &str) -> Option<&'a str> {
    resolve(tree, path).and_then(Value::as_str)
}
