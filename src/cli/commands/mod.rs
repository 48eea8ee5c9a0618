pub mod check;
pub mod init;
pub mod locale;
pub mod lookup;
pub mod project;

use std::path::PathBuf;

use serde_json::Value;

use super::exit_status::ExitStatus;
use crate::audit::{AuditIssue, Severity};
use crate::core::Diagnostic;

/// What a lookup printed.
#[derive(Debug)]
pub enum LookupValue {
    String(String),
    Structured(Value),
}

#[derive(Debug)]
pub struct LookupSummary {
    pub path: String,
    pub locale: String,
    pub value: LookupValue,
}

#[derive(Debug)]
pub enum LocaleSummary {
    Show {
        active: String,
        default: String,
        supported: Vec<String>,
    },
    Set {
        requested: String,
        accepted: bool,
        active: String,
        /// False when the storage write failed; the change only held for this run.
        saved: bool,
    },
    Reset {
        active: String,
        saved: bool,
    },
}

#[derive(Debug)]
pub struct CheckSummary {
    /// Directory the locale files were loaded from, for issue locations.
    pub messages_dir: PathBuf,
    pub source_files_checked: usize,
    pub locale_files_checked: usize,
    /// Source files that could not be read.
    pub read_error_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub config_path: PathBuf,
    /// Default locale file written because it did not exist yet.
    pub created_messages: Option<PathBuf>,
}

#[derive(Debug)]
pub enum CommandSummary {
    Lookup(LookupSummary),
    Locale(LocaleSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub issues: Vec<AuditIssue>,
    /// Diagnostics recorded by the engine while the command ran.
    pub diagnostics: Vec<Diagnostic>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            issues: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
            .count()
    }

    pub fn exit_status(&self) -> ExitStatus {
        let failed = match &self.summary {
            CommandSummary::Lookup(_) => self
                .diagnostics
                .iter()
                .any(|d| {
                    matches!(
                        d,
                        Diagnostic::MissingTranslation { .. } | Diagnostic::InvalidLocale { .. }
                    )
                }),
            CommandSummary::Locale(LocaleSummary::Set {
                accepted, saved, ..
            }) => !accepted || !saved,
            CommandSummary::Locale(LocaleSummary::Reset { saved, .. }) => !saved,
            CommandSummary::Locale(_) | CommandSummary::Init(_) => false,
            CommandSummary::Check(_) => self.error_count() > 0,
        };
        if failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
