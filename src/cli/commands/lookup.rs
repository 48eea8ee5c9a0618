use anyhow::Result;

use super::super::args::LookupCommand;
use super::project::Project;
use super::{CommandResult, CommandSummary, LookupSummary, LookupValue};
use crate::core::{Accessor, Diagnostic, DiagnosticSink, FallbackPolicy};

pub fn get(cmd: LookupCommand) -> Result<CommandResult> {
    lookup(cmd, Accessor::String)
}

pub fn structured(cmd: LookupCommand) -> Result<CommandResult> {
    lookup(cmd, Accessor::Structured)
}

fn lookup(cmd: LookupCommand, accessor: Accessor) -> Result<CommandResult> {
    let project = Project::load(&cmd.common)?;
    let ctx = project.context();

    // `--locale` applies to this lookup only and is never persisted.
    let one_shot = match cmd.locale {
        Some(code) if project.catalog.locales().contains(&code) => Some(code),
        Some(code) => {
            project.sink.record(Diagnostic::InvalidLocale { code });
            None
        }
        None => None,
    };

    let (locale, value) = match one_shot {
        Some(locale) => {
            let policy = FallbackPolicy::new(&project.catalog, &locale, project.sink.as_ref());
            let value = match accessor {
                Accessor::String => LookupValue::String(policy.get_string(&cmd.path)),
                Accessor::Structured => LookupValue::Structured(policy.get_structured(&cmd.path)),
            };
            (locale, value)
        }
        None => {
            let value = match accessor {
                Accessor::String => LookupValue::String(ctx.get_string(&cmd.path)),
                Accessor::Structured => LookupValue::Structured(ctx.get_structured(&cmd.path)),
            };
            (ctx.locale(), value)
        }
    };

    let mut result = CommandResult::new(CommandSummary::Lookup(LookupSummary {
        path: cmd.path,
        locale,
        value,
    }));
    result.diagnostics = project.sink.take();
    Ok(result)
}
