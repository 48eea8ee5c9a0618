//! Runtime diagnostics recorded by the locale engine.
//!
//! Nothing in the engine fails outward: misses, fallbacks, rejected locales
//! and storage failures are recovered locally and reported here instead.
//! Where the reports go is decided by a [`DiagnosticSink`].

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

// ============================================================
// Severity and Kind
// ============================================================

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Which accessor produced a lookup diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    String,
    Structured,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::String => write!(f, "string"),
            Accessor::Structured => write!(f, "structured"),
        }
    }
}

/// Storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Read,
    Write,
    Remove,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOp::Read => write!(f, "read"),
            StorageOp::Write => write!(f, "write"),
            StorageOp::Remove => write!(f, "remove"),
        }
    }
}

// ============================================================
// Diagnostic
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The active locale lacked the key; the default locale's value was served.
    FallbackUsed { locale: String, path: String },
    /// Neither the active nor the default locale had a usable value.
    MissingTranslation {
        locale: String,
        path: String,
        accessor: Accessor,
    },
    /// A locale change was requested for a code outside the allow-list.
    InvalidLocale { code: String },
    /// Durable storage could not be read or written.
    PersistenceFailed { op: StorageOp, error: String },
    /// A structured value did not deserialize into the caller's expected shape.
    ShapeMismatch {
        locale: String,
        path: String,
        expected: &'static str,
        error: String,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::FallbackUsed { .. } => Severity::Info,
            Diagnostic::MissingTranslation { .. }
            | Diagnostic::InvalidLocale { .. }
            | Diagnostic::PersistenceFailed { .. }
            | Diagnostic::ShapeMismatch { .. } => Severity::Warning,
        }
    }

    /// Short kebab-case name, stable for log filtering.
    pub fn name(&self) -> &'static str {
        match self {
            Diagnostic::FallbackUsed { .. } => "fallback-used",
            Diagnostic::MissingTranslation { .. } => "missing-translation",
            Diagnostic::InvalidLocale { .. } => "invalid-locale",
            Diagnostic::PersistenceFailed { .. } => "persistence-failed",
            Diagnostic::ShapeMismatch { .. } => "shape-mismatch",
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Diagnostic::FallbackUsed { path, .. }
            | Diagnostic::MissingTranslation { path, .. }
            | Diagnostic::ShapeMismatch { path, .. } => Some(path),
            Diagnostic::InvalidLocale { .. } | Diagnostic::PersistenceFailed { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FallbackUsed { locale, path } => {
                write!(f, "'{}' missing in '{}', served default locale", path, locale)
            }
            Diagnostic::MissingTranslation {
                locale,
                path,
                accessor,
            } => write!(
                f,
                "no {} translation for '{}' (active locale '{}')",
                accessor, path, locale
            ),
            Diagnostic::InvalidLocale { code } => write!(f, "unsupported locale '{}'", code),
            Diagnostic::PersistenceFailed { op, error } => {
                write!(f, "locale preference {} failed: {}", op, error)
            }
            Diagnostic::ShapeMismatch {
                locale,
                path,
                expected,
                error,
            } => write!(
                f,
                "'{}' in '{}' is not a {}: {}",
                path, locale, expected, error
            ),
        }
    }
}

// ============================================================
// Sinks
// ============================================================

/// Destination for diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn record(&self, diagnostic: Diagnostic) {
        (**self).record(diagnostic)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn record(&self, diagnostic: Diagnostic) {
        (**self).record(diagnostic)
    }
}

/// Emits diagnostics as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        let kind = diagnostic.name();
        match &diagnostic {
            Diagnostic::FallbackUsed { locale, path } => {
                tracing::debug!(kind = kind, %locale, %path, "{}", diagnostic);
            }
            Diagnostic::MissingTranslation { locale, path, .. }
            | Diagnostic::ShapeMismatch { locale, path, .. } => {
                tracing::warn!(kind = kind, %locale, %path, "{}", diagnostic);
            }
            Diagnostic::InvalidLocale { code } => {
                tracing::warn!(kind = kind, %code, "{}", diagnostic);
            }
            Diagnostic::PersistenceFailed { .. } => {
                tracing::warn!(kind = kind, "{}", diagnostic);
            }
        }
    }
}

/// Keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Number of recorded diagnostics with the given [`Diagnostic::name`].
    pub fn count(&self, name: &str) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|d| d.name() == name)
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: Diagnostic) {
        self.records.lock().push(diagnostic);
    }
}

/// Forwards each diagnostic to two sinks.
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn record(&self, diagnostic: Diagnostic) {
        self.0.record(diagnostic.clone());
        self.1.record(diagnostic);
    }
}
