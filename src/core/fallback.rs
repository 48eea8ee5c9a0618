//! Default-locale fallback on top of [`resolve`](crate::core::resolve::resolve).
//!
//! The two accessors differ only in what they hand back on a total miss:
//!
//! | accessor         | hit (active) | hit (default)        | miss                      |
//! |------------------|--------------|----------------------|---------------------------|
//! | `get_string`     | string       | string + fallback    | the path itself + missing |
//! | `get_structured` | any value    | any value + fallback | `{}` + missing            |
//!
//! A structured fallback always returns the whole node from the default
//! locale; values from two locales are never merged.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::catalog::Catalog;
use crate::core::diagnostics::{Accessor, Diagnostic, DiagnosticSink};
use crate::core::resolve::resolve;
use crate::core::tree::TranslationTree;

static EMPTY_TREE: std::sync::LazyLock<TranslationTree> =
    std::sync::LazyLock::new(TranslationTree::default);

/// Lookups for one active locale against a catalog.
pub struct FallbackPolicy<'a> {
    catalog: &'a Catalog,
    active: &'a str,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> FallbackPolicy<'a> {
    pub fn new(catalog: &'a Catalog, active: &'a str, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            catalog,
            active,
            sink,
        }
    }

    fn active_tree(&self) -> &'a TranslationTree {
        self.catalog.tree(self.active).unwrap_or(&EMPTY_TREE)
    }

    fn is_default_active(&self) -> bool {
        self.catalog.locales().is_default(self.active)
    }

    /// Resolve a string, falling back to the default locale and finally to
    /// `path` itself so gaps stay visible in rendered output.
    pub fn get_string(&self, path: &str) -> String {
        if let Some(Value::String(s)) = resolve(self.active_tree(), path) {
            return s.clone();
        }

        if !self.is_default_active()
            && let Some(Value::String(s)) = resolve(self.catalog.default_tree(), path)
        {
            self.record_fallback(path);
            return s.clone();
        }

        self.record_missing(path, Accessor::String);
        path.to_string()
    }

    /// Resolve any value, falling back to the default locale's whole node
    /// and finally to an empty object.
    pub fn get_structured(&self, path: &str) -> Value {
        if let Some(value) = resolve(self.active_tree(), path) {
            return value.clone();
        }

        if !self.is_default_active()
            && let Some(value) = resolve(self.catalog.default_tree(), path)
        {
            self.record_fallback(path);
            return value.clone();
        }

        self.record_missing(path, Accessor::Structured);
        Value::Object(Map::new())
    }

    /// [`get_structured`](Self::get_structured) deserialized into `T`.
    ///
    /// A value that does not fit `T` is reported as a shape mismatch and
    /// replaced by `T::default()`.
    pub fn get_structured_as<T>(&self, path: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let value = self.get_structured(path);
        match serde_json::from_value::<T>(value) {
            Ok(v) => v,
            Err(e) => {
                self.sink.record(Diagnostic::ShapeMismatch {
                    locale: self.active.to_string(),
                    path: path.to_string(),
                    expected: type_name::<T>(),
                    error: e.to_string(),
                });
                T::default()
            }
        }
    }

    fn record_fallback(&self, path: &str) {
        self.sink.record(Diagnostic::FallbackUsed {
            locale: self.active.to_string(),
            path: path.to_string(),
        });
    }

    fn record_missing(&self, path: &str, accessor: Accessor) {
        self.sink.record(Diagnostic::MissingTranslation {
            locale: self.active.to_string(),
            path: path.to_string(),
            accessor,
        });
    }
}
