//! Offline checks over translation trees and the code that uses them.
//!
//! - `scan`: find source files to inspect
//! - `usage`: extract literal dot-path keys passed to accessors
//! - `coverage`: compare each locale against the default locale
//!
//! Nothing here runs on the lookup path. The engine never enforces key
//! parity between locales; these checks only report.

pub mod coverage;
pub mod scan;
pub mod usage;

use std::fmt;

use crate::core::{Catalog, NodeKind, resolve};

pub use coverage::check_coverage;
pub use scan::{ScanResult, scan_files};
pub use usage::{Expect, KeyUsage, UsageExtractor};

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnknownKey,
    KindMismatch,
    FallbackGap,
    ShapeDrift,
    OrphanKey,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::KindMismatch => write!(f, "kind-mismatch"),
            Rule::FallbackGap => write!(f, "fallback-gap"),
            Rule::ShapeDrift => write!(f, "shape-drift"),
            Rule::OrphanKey => write!(f, "orphan-key"),
        }
    }
}

// ============================================================
// Issues
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuditIssue {
    /// Key used by code (or passed for validation) that the default locale lacks.
    UnknownKey {
        key: String,
        usage: Option<KeyUsage>,
    },
    /// Key exists in the default locale but not as the kind the accessor expects.
    KindMismatch {
        key: String,
        found: NodeKind,
        usage: KeyUsage,
    },
    /// Leaf in the default locale that `locale` cannot serve itself.
    FallbackGap { locale: String, key: String },
    /// Structured leaf that `locale` has, but as a different kind of node
    /// than the default locale. Structured lookups return it as is.
    ShapeDrift {
        locale: String,
        key: String,
        expected: NodeKind,
        found: NodeKind,
    },
    /// Leaf in `locale` that the default locale does not have.
    OrphanKey { locale: String, key: String },
}

impl AuditIssue {
    pub fn rule(&self) -> Rule {
        match self {
            AuditIssue::UnknownKey { .. } => Rule::UnknownKey,
            AuditIssue::KindMismatch { .. } => Rule::KindMismatch,
            AuditIssue::FallbackGap { .. } => Rule::FallbackGap,
            AuditIssue::ShapeDrift { .. } => Rule::ShapeDrift,
            AuditIssue::OrphanKey { .. } => Rule::OrphanKey,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AuditIssue::UnknownKey { .. } => Severity::Error,
            AuditIssue::KindMismatch { .. }
            | AuditIssue::FallbackGap { .. }
            | AuditIssue::ShapeDrift { .. }
            | AuditIssue::OrphanKey { .. } => Severity::Warning,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            AuditIssue::UnknownKey { key, .. }
            | AuditIssue::KindMismatch { key, .. }
            | AuditIssue::FallbackGap { key, .. }
            | AuditIssue::ShapeDrift { key, .. }
            | AuditIssue::OrphanKey { key, .. } => key,
        }
    }

    pub fn usage(&self) -> Option<&KeyUsage> {
        match self {
            AuditIssue::UnknownKey { usage, .. } => usage.as_ref(),
            AuditIssue::KindMismatch { usage, .. } => Some(usage),
            AuditIssue::FallbackGap { .. }
            | AuditIssue::ShapeDrift { .. }
            | AuditIssue::OrphanKey { .. } => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuditIssue::UnknownKey { key, .. } => {
                format!("\"{}\" does not exist in the default locale", key)
            }
            AuditIssue::KindMismatch { key, found, usage } => format!(
                "\"{}\" resolves to {} but {}() expects {}",
                key,
                with_article(*found),
                usage.accessor,
                usage.expects
            ),
            AuditIssue::FallbackGap { locale, key } => {
                format!("\"{}\" missing in '{}', default locale will be served", key, locale)
            }
            AuditIssue::ShapeDrift {
                locale,
                key,
                expected,
                found,
            } => format!(
                "\"{}\" is {} in '{}' but {} in the default locale",
                key,
                with_article(*found),
                locale,
                with_article(*expected)
            ),
            AuditIssue::OrphanKey { locale, key } => {
                format!("\"{}\" in '{}' is not in the default locale", key, locale)
            }
        }
    }
}

fn with_article(kind: NodeKind) -> String {
    match kind {
        NodeKind::Array => format!("an {}", kind),
        _ => format!("a {}", kind),
    }
}

/// Check bare dot paths against the default locale.
pub fn validate_paths<'p, I>(catalog: &Catalog, paths: I) -> Vec<AuditIssue>
where
    I: IntoIterator<Item = &'p str>,
{
    let tree = catalog.default_tree();
    paths
        .into_iter()
        .filter(|path| resolve(tree, path).is_none())
        .map(|path| AuditIssue::UnknownKey {
            key: path.to_string(),
            usage: None,
        })
        .collect()
}

/// Check extracted usages against the default locale, including the kind
/// of node each accessor expects.
pub fn validate_usages(catalog: &Catalog, usages: &[KeyUsage]) -> Vec<AuditIssue> {
    let tree = catalog.default_tree();
    let mut issues = Vec::new();

    for usage in usages {
        match resolve(tree, &usage.key) {
            None => issues.push(AuditIssue::UnknownKey {
                key: usage.key.clone(),
                usage: Some(usage.clone()),
            }),
            Some(value) => {
                let found = NodeKind::of(value);
                if !usage.expects.accepts(found) {
                    issues.push(AuditIssue::KindMismatch {
                        key: usage.key.clone(),
                        found,
                        usage: usage.clone(),
                    });
                }
            }
        }
    }

    issues.sort();
    issues
}
