//! Lingo - locale resolution for nested translation trees
//!
//! Lingo loads one JSON translation tree per supported locale, resolves
//! dot-separated key paths against the active locale, falls back to the
//! default locale when a key is missing, and remembers the user's locale
//! choice across restarts. A small CLI exposes lookups, the persisted
//! preference, and offline checks of keys used in source code.
//!
//! ## Module Structure
//!
//! - `core`: Trees, dot-path resolution, fallback rules and diagnostics
//! - `store`: Key-value storage backends and the locale preference
//! - `context`: The shared locale context handed to consumers
//! - `audit`: Key validation and locale coverage reports
//! - `config`: Configuration file loading and parsing
//! - `logging`: `tracing` subscriber setup for the binary
//! - `cli`: Command-line interface layer
//!
//! ## Example
//!
//! ```
//! use lingo::{Catalog, LocaleContext, SupportedLocales, TranslationTree};
//! use serde_json::json;
//!
//! let locales = SupportedLocales::new(["nl", "en"], "nl")?;
//! let catalog = Catalog::from_trees(
//!     locales,
//!     [
//!         ("nl".to_string(), TranslationTree::from_value(json!({"hero": {"title": "Welkom"}}))?),
//!         ("en".to_string(), TranslationTree::from_value(json!({"hero": {}}))?),
//!     ],
//! )?;
//!
//! let ctx = LocaleContext::builder(catalog).init();
//! assert!(ctx.set_locale("en"));
//! assert_eq!(ctx.get_string("hero.title"), "Welkom");
//! assert_eq!(ctx.get_string("hero.missing"), "hero.missing");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod logging;
pub mod store;

pub use context::{LocaleContext, LocaleContextBuilder, Persistence};
pub use crate::core::{
    Catalog, Diagnostic, DiagnosticSink, FallbackPolicy, MemorySink, SupportedLocales,
    TranslationTree,
};
pub use store::{FileStorage, KeyValueStorage, LocalePreferenceStore, MemoryStorage};
