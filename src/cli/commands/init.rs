use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

/// Write a default config into `dir`, plus an empty default-locale file if
/// the messages directory has none.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }
    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let config = Config::default();
    let messages_file = config
        .messages_dir(dir)
        .join(format!("{}.json", config.default_locale));
    let created_messages = if messages_file.exists() {
        None
    } else {
        if let Some(parent) = messages_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&messages_file, "{}\n")
            .with_context(|| format!("Failed to write {}", messages_file.display()))?;
        Some(messages_file)
    };

    Ok(CommandResult::new(CommandSummary::Init(InitSummary {
        config_path,
        created_messages,
    })))
}
