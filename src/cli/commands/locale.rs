use anyhow::Result;

use super::super::args::{LocaleAction, LocaleCommand};
use super::project::Project;
use super::{CommandResult, CommandSummary, LocaleSummary};
use crate::core::{Diagnostic, StorageOp};

pub fn locale(cmd: LocaleCommand) -> Result<CommandResult> {
    let project = Project::load(&cmd.common)?;
    let ctx = project.context();

    let mut summary = match cmd.action {
        None => LocaleSummary::Show {
            active: ctx.locale(),
            default: ctx.default_locale().to_string(),
            supported: project.catalog.locales().codes().to_vec(),
        },
        Some(LocaleAction::Set { code }) => {
            let accepted = ctx.set_locale(&code);
            LocaleSummary::Set {
                requested: code,
                accepted,
                active: ctx.locale(),
                saved: true,
            }
        }
        Some(LocaleAction::Reset) => {
            ctx.clear_preference();
            LocaleSummary::Reset {
                active: ctx.default_locale().to_string(),
                saved: true,
            }
        }
    };
    ctx.flush();

    let diagnostics = project.sink.take();
    if let LocaleSummary::Set { saved, .. } | LocaleSummary::Reset { saved, .. } = &mut summary {
        *saved = !write_failed(&diagnostics);
    }

    let mut result = CommandResult::new(CommandSummary::Locale(summary));
    result.diagnostics = diagnostics;
    Ok(result)
}

/// Whether persisting the preference failed. Failed reads at startup only
/// mean the default locale was used and do not count.
fn write_failed(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| {
        matches!(
            d,
            Diagnostic::PersistenceFailed {
                op: StorageOp::Write | StorageOp::Remove,
                ..
            }
        )
    })
}
