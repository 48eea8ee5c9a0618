//! Report formatting and printing utilities.
//!
//! Audit issues are displayed in cargo-style format. Lookup values go to
//! stdout untouched so they can be piped; everything else about a lookup
//! (diagnostics, hints) goes to stderr.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, InitSummary, LocaleSummary, LookupSummary,
    LookupValue,
};
use crate::audit::{AuditIssue, KeyUsage, Severity};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{Diagnostic, Severity as DiagnosticSeverity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Lookup(summary) => print_lookup(summary, &mut stdout),
        CommandSummary::Locale(summary) => print_locale(summary, &mut stdout),
        CommandSummary::Check(summary) => print_check(&result.issues, summary, &mut stdout),
        CommandSummary::Init(summary) => print_init(summary, &mut stdout),
    }
    print_diagnostics_to(&result.diagnostics, verbose, &mut io::stderr().lock());
}

/// Print issues to a custom writer, followed by a problem summary.
pub fn report_to<W: Write>(issues: &[AuditIssue], messages_dir: &Path, writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut located: Vec<(Location<'_>, &AuditIssue)> = issues
        .iter()
        .map(|issue| (locate(issue, messages_dir), issue))
        .collect();
    located.sort_by(|(a, _), (b, _)| a.sort_key().cmp(&b.sort_key()));

    // Calculate max line number width for alignment
    let max_line_width = located
        .iter()
        .filter_map(|(loc, _)| match loc {
            Location::Source(usage) => Some(usage.line),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for (loc, issue) in &located {
        print_issue(issue, loc, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print engine diagnostics. Informational ones only when verbose.
pub fn print_diagnostics_to<W: Write>(diagnostics: &[Diagnostic], verbose: bool, writer: &mut W) {
    for diagnostic in diagnostics {
        let label = match diagnostic.severity() {
            DiagnosticSeverity::Warning => "warning".bold().yellow(),
            DiagnosticSeverity::Info if verbose => "info".bold().cyan(),
            DiagnosticSeverity::Info => continue,
        };
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            label,
            diagnostic,
            diagnostic.name().dimmed().cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

enum Location<'a> {
    Source(&'a KeyUsage),
    File(PathBuf),
    Unknown,
}

impl Location<'_> {
    fn sort_key(&self) -> (String, usize, usize) {
        match self {
            Location::Source(usage) => (usage.file_path.clone(), usage.line, usage.col),
            Location::File(path) => (path.to_string_lossy().to_string(), 0, 0),
            Location::Unknown => (String::new(), 0, 0),
        }
    }
}

fn locate<'a>(issue: &'a AuditIssue, messages_dir: &Path) -> Location<'a> {
    match issue {
        AuditIssue::FallbackGap { locale, .. }
        | AuditIssue::ShapeDrift { locale, .. }
        | AuditIssue::OrphanKey { locale, .. } => {
            Location::File(messages_dir.join(format!("{}.json", locale)))
        }
        _ => issue.usage().map_or(Location::Unknown, Location::Source),
    }
}

fn print_issue<W: Write>(
    issue: &AuditIssue,
    loc: &Location<'_>,
    writer: &mut W,
    max_line_width: usize,
) {
    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    match loc {
        Location::Source(usage) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                usage.file_path,
                usage.line,
                usage.col
            );
            print_source_context(usage, severity, writer, max_line_width);
        }
        Location::File(path) => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path.display());
        }
        Location::Unknown => {}
    }

    if let AuditIssue::FallbackGap { .. } = issue {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} add the key to this locale to stop falling back",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_source_context<W: Write>(
    usage: &KeyUsage,
    severity: Severity,
    writer: &mut W,
    max_line_width: usize,
) {
    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        usage.line.to_string().blue(),
        "|".blue(),
        usage.source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = usage
        .source_line
        .chars()
        .take(usage.col.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );
}

fn print_summary<W: Write>(issues: &[AuditIssue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_lookup<W: Write>(summary: &LookupSummary, writer: &mut W) {
    match &summary.value {
        LookupValue::String(value) => {
            let _ = writeln!(writer, "{}", value);
        }
        LookupValue::Structured(value) => {
            let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".into());
            let _ = writeln!(writer, "{}", rendered);
        }
    }
}

fn print_locale<W: Write>(summary: &LocaleSummary, writer: &mut W) {
    match summary {
        LocaleSummary::Show {
            active,
            default,
            supported,
        } => {
            let _ = writeln!(writer, "{}", active);
            let _ = writeln!(
                writer,
                "{}",
                format!("default: {}, supported: {}", default, supported.join(", ")).dimmed()
            );
        }
        LocaleSummary::Set {
            requested,
            accepted: true,
            saved: false,
            ..
        } => {
            let _ = writeln!(
                writer,
                "{} Locale set to '{}' for this run only, it could not be saved",
                FAILURE_MARK.red(),
                requested
            );
        }
        LocaleSummary::Set {
            requested,
            accepted: true,
            ..
        } => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Locale set to '{}'", requested).green()
            );
        }
        LocaleSummary::Set {
            requested, active, ..
        } => {
            let _ = writeln!(
                writer,
                "{} Locale '{}' is not supported, keeping '{}'",
                FAILURE_MARK.red(),
                requested,
                active
            );
        }
        LocaleSummary::Reset {
            saved: false,
            ..
        } => {
            let _ = writeln!(
                writer,
                "{} Locale preference could not be cleared",
                FAILURE_MARK.red()
            );
        }
        LocaleSummary::Reset { active, .. } => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Locale preference cleared, '{}' will be used", active).green()
            );
        }
    }
}

fn print_check<W: Write>(issues: &[AuditIssue], summary: &CheckSummary, writer: &mut W) {
    report_to(issues, &summary.messages_dir, writer);

    if issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {}, {} - no issues found",
                plural(summary.source_files_checked, "source file"),
                plural(summary.locale_files_checked, "locale file")
            )
            .green()
        );
    }

    if summary.read_error_count > 0 {
        let _ = writeln!(
            io::stderr().lock(),
            "{} {} could not be read (use {} for details)",
            "warning:".bold().yellow(),
            plural(summary.read_error_count, "file"),
            "-v".cyan()
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    if let Some(path) = &summary.created_messages {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", path.display()).green()
        );
    }
}
