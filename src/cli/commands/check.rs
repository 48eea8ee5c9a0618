use anyhow::Result;
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::project::Project;
use super::{CheckSummary, CommandResult, CommandSummary};
use crate::audit::{UsageExtractor, check_coverage, scan_files, validate_usages};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    /// Keys used in source code exist in the default locale with the right kind
    Keys,
    /// Every non-default locale against the default locale
    Coverage,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![CheckRule::Keys, CheckRule::Coverage]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let project = Project::load(&cmd.common)?;
    let config = &project.config;

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks
    };

    let mut issues = Vec::new();
    let mut source_files_checked = 0;
    let mut read_error_count = 0;

    for check in checks {
        match check {
            CheckRule::Keys => {
                let scan = scan_files(
                    &project.source_dir(),
                    &config.includes,
                    &config.ignores,
                    config.ignore_test_files,
                );
                if scan.skipped_count > 0 {
                    tracing::warn!(
                        "{} path(s) skipped due to access errors",
                        scan.skipped_count
                    );
                }

                let extractor =
                    UsageExtractor::new(&config.string_accessors, &config.structured_accessors)?;
                let (usages, errors) = extractor.extract_files(&scan.files);
                for (path, error) in &errors {
                    tracing::debug!("cannot read {}: {}", path, error);
                }

                source_files_checked = scan.files.len();
                read_error_count = errors.len();
                issues.extend(validate_usages(&project.catalog, &usages));
            }
            CheckRule::Coverage => {
                issues.extend(check_coverage(&project.catalog));
            }
        }
    }

    let mut result = CommandResult::new(CommandSummary::Check(CheckSummary {
        messages_dir: project.messages_dir(),
        source_files_checked,
        locale_files_checked: project.catalog.len(),
        read_error_count,
    }));
    result.issues = issues;
    result.diagnostics = project.sink.take();
    Ok(result)
}
