//! The locale context: one active locale shared by every consumer.
//!
//! A context is created once at startup through [`LocaleContextBuilder`],
//! which restores the persisted preference, and is then passed to whoever
//! needs translations (wrapped in an `Arc` when shared across threads).
//! Lookups always use the locale active at call time; nothing resolved is
//! cached across locale changes.

mod persist;

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::audit::{AuditIssue, validate_paths};
use crate::core::{Catalog, Diagnostic, DiagnosticSink, FallbackPolicy, TracingSink};
use crate::store::{
    DEFAULT_STORAGE_KEY, KeyValueStorage, LocalePreferenceStore, MemoryStorage,
};

pub use persist::Persistence;
use persist::Persister;

/// Configuration for a [`LocaleContext`] that has not restored its locale yet.
pub struct LocaleContextBuilder {
    catalog: Arc<Catalog>,
    storage: Option<Arc<dyn KeyValueStorage>>,
    storage_key: String,
    sink: Arc<dyn DiagnosticSink>,
    persistence: Persistence,
}

impl LocaleContextBuilder {
    /// Backend for the persisted preference. Defaults to process memory.
    pub fn storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Destination for diagnostics. Defaults to [`TracingSink`].
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Restore the persisted locale (or the default) and return the ready context.
    pub fn init(self) -> LocaleContext {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let store = Arc::new(
            LocalePreferenceStore::new(
                storage,
                self.storage_key,
                self.catalog.locales().clone(),
            )
            .with_sink(self.sink.clone()),
        );

        let active = store.load();
        tracing::debug!(locale = %active, "locale context ready");

        LocaleContext {
            catalog: self.catalog,
            active: RwLock::new(active),
            writer: Mutex::new(()),
            persister: Persister::new(store, self.persistence),
            sink: self.sink,
        }
    }
}

pub struct LocaleContext {
    catalog: Arc<Catalog>,
    active: RwLock<String>,
    // Serializes locale changes so storage sees them in the same order as memory.
    writer: Mutex<()>,
    persister: Persister,
    sink: Arc<dyn DiagnosticSink>,
}

impl LocaleContext {
    pub fn builder(catalog: impl Into<Arc<Catalog>>) -> LocaleContextBuilder {
        LocaleContextBuilder {
            catalog: catalog.into(),
            storage: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sink: Arc::new(TracingSink),
            persistence: Persistence::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn locale(&self) -> String {
        self.active.read().clone()
    }

    pub fn default_locale(&self) -> &str {
        self.catalog.locales().default_locale()
    }

    pub fn persistence(&self) -> Persistence {
        self.persister.mode()
    }

    /// Switch the active locale and persist it.
    ///
    /// Returns `false` (and changes nothing) when `code` is not supported.
    pub fn set_locale(&self, code: &str) -> bool {
        if !self.catalog.locales().contains(code) {
            self.sink.record(Diagnostic::InvalidLocale {
                code: code.to_string(),
            });
            return false;
        }

        let _writer = self.writer.lock();
        {
            let mut active = self.active.write();
            if *active != code {
                tracing::debug!(from = %active.as_str(), to = %code, "switching locale");
                *active = code.to_string();
            }
        }
        self.persister.save(code);
        true
    }

    /// Forget the persisted preference. The active locale is unchanged.
    pub fn clear_preference(&self) {
        let _writer = self.writer.lock();
        self.persister.clear();
    }

    /// Wait for queued preference writes. A no-op for [`Persistence::Inline`].
    pub fn flush(&self) {
        self.persister.flush();
    }

    pub fn get_string(&self, path: &str) -> String {
        let locale = self.locale();
        self.policy(&locale).get_string(path)
    }

    pub fn get_structured(&self, path: &str) -> Value {
        let locale = self.locale();
        self.policy(&locale).get_structured(path)
    }

    pub fn get_structured_as<T>(&self, path: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let locale = self.locale();
        self.policy(&locale).get_structured_as(path)
    }

    /// Check that each path exists in the default locale.
    pub fn validate_keys<'p, I>(&self, paths: I) -> Vec<AuditIssue>
    where
        I: IntoIterator<Item = &'p str>,
    {
        validate_paths(&self.catalog, paths)
    }

    fn policy<'a>(&'a self, locale: &'a str) -> FallbackPolicy<'a> {
        FallbackPolicy::new(&self.catalog, locale, self.sink.as_ref())
    }
}
