//! Core resolution engine.
//!
//! - `locale`: the supported-locale allow-list
//! - `tree`: immutable per-locale translation trees
//! - `catalog`: loading trees for every locale
//! - `resolve`: dot-path resolution within one tree
//! - `fallback`: string/structured accessors with default-locale fallback
//! - `diagnostics`: recorded misses, fallbacks and recovered failures

pub mod catalog;
pub mod diagnostics;
pub mod fallback;
pub mod locale;
pub mod resolve;
pub mod tree;

pub use catalog::{Catalog, LoadWarning};
pub use diagnostics::{
    Accessor, Diagnostic, DiagnosticSink, MemorySink, Severity, StorageOp, Tee, TracingSink,
};
pub use fallback::FallbackPolicy;
pub use locale::SupportedLocales;
pub use resolve::{resolve, resolve_str};
pub use tree::{LeafPath, NodeKind, TranslationTree, is_structured_map};
