//! Persisted locale preference.
//!
//! The preference is a soft enhancement: reads that fail look like "nothing
//! stored" and writes that fail are dropped. Neither ever reaches the caller.

use std::sync::Arc;

use crate::core::diagnostics::{Diagnostic, DiagnosticSink, StorageOp, TracingSink};
use crate::core::locale::SupportedLocales;
use crate::store::storage::{KeyValueStorage, StorageError};

pub const DEFAULT_STORAGE_KEY: &str = "lingo.locale";

pub struct LocalePreferenceStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    locales: SupportedLocales,
    sink: Arc<dyn DiagnosticSink>,
}

impl LocalePreferenceStore {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        key: impl Into<String>,
        locales: SupportedLocales,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            locales,
            sink: Arc::new(TracingSink),
        }
    }

    /// Send persistence failures to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Stored locale if it is present and supported, else the default locale.
    pub fn load(&self) -> String {
        let stored = match self.storage.get(&self.key) {
            Ok(stored) => stored,
            Err(e) => {
                self.report(StorageOp::Read, &e);
                None
            }
        };

        match stored {
            Some(code) if self.locales.contains(&code) => {
                tracing::debug!(key = %self.key, locale = %code, "restored locale preference");
                code
            }
            Some(code) => {
                tracing::debug!(
                    key = %self.key,
                    value = %code,
                    "ignoring stored locale outside the allow-list"
                );
                self.locales.default_locale().to_string()
            }
            None => self.locales.default_locale().to_string(),
        }
    }

    /// Persist `locale`. Unsupported codes are ignored without writing.
    pub fn save(&self, locale: &str) {
        if !self.locales.contains(locale) {
            tracing::debug!(%locale, "not persisting unsupported locale");
            return;
        }
        if let Err(e) = self.storage.set(&self.key, locale) {
            self.report(StorageOp::Write, &e);
        }
    }

    /// Forget the stored preference.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            self.report(StorageOp::Remove, &e);
        }
    }

    fn report(&self, op: StorageOp, error: &StorageError) {
        self.sink.record(Diagnostic::PersistenceFailed {
            op,
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::diagnostics::MemorySink;
    use crate::store::storage::MemoryStorage;

    fn locales() -> SupportedLocales {
        SupportedLocales::new(["nl", "en"], "nl").unwrap()
    }

    fn store(storage: Arc<MemoryStorage>, sink: Arc<MemorySink>) -> LocalePreferenceStore {
        LocalePreferenceStore::new(storage, DEFAULT_STORAGE_KEY, locales()).with_sink(sink)
    }

    #[test]
    fn test_load_without_stored_value() {
        let storage = Arc::new(MemoryStorage::new());
        let sink = Arc::new(MemorySink::new());
        assert_eq!(store(storage, sink.clone()).load(), "nl");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let storage = Arc::new(MemoryStorage::new());
        let sink = Arc::new(MemorySink::new());
        let prefs = store(storage.clone(), sink);

        prefs.save("en");
        assert_eq!(storage.peek(DEFAULT_STORAGE_KEY), Some("en".to_string()));
        assert_eq!(prefs.load(), "en");
    }

    #[test]
    fn test_save_rejects_unsupported() {
        let storage = Arc::new(MemoryStorage::new());
        let sink = Arc::new(MemorySink::new());
        let prefs = store(storage.clone(), sink.clone());

        prefs.save("xx");
        assert_eq!(storage.write_count(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_load_ignores_unsupported_stored_value() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(DEFAULT_STORAGE_KEY, "klingon").unwrap();
        let sink = Arc::new(MemorySink::new());

        assert_eq!(store(storage, sink).load(), "nl");
    }

    #[test]
    fn test_unavailable_storage_is_swallowed() {
        let storage = Arc::new(MemoryStorage::unavailable());
        let sink = Arc::new(MemorySink::new());
        let prefs = store(storage, sink.clone());

        assert_eq!(prefs.load(), "nl");
        prefs.save("en");
        prefs.clear();

        let ops: Vec<StorageOp> = sink
            .snapshot()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::PersistenceFailed { op, .. } => Some(op),
                _ => None,
            })
            .collect();
        assert_eq!(ops, vec![StorageOp::Read, StorageOp::Write, StorageOp::Remove]);
    }

    #[test]
    fn test_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let sink = Arc::new(MemorySink::new());
        let prefs = store(storage.clone(), sink);

        prefs.save("en");
        prefs.clear();
        assert_eq!(storage.peek(DEFAULT_STORAGE_KEY), None);
        assert_eq!(prefs.load(), "nl");
    }
}
