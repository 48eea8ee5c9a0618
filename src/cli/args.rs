//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `get`: Look up a string in the active (or given) locale
//! - `structured`: Look up a structured value and print it as JSON
//! - `locale`: Show, set or reset the persisted locale preference
//! - `check`: Validate keys used in source code and report locale coverage
//! - `init`: Initialize a lingo configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Get(cmd)) | Some(Command::Structured(cmd)) => cmd.common.verbose,
            Some(Command::Locale(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory to search for .lingorc.json from (defaults to the current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Default locale (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Preference storage file (overrides config file)
    #[arg(long)]
    pub storage_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Dot-separated key path, e.g. hero.title
    pub path: String,

    /// Look up in this locale instead of the persisted one (not saved)
    #[arg(long)]
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum LocaleAction {
    /// Switch the active locale and persist it
    Set {
        /// Locale code from the configured allow-list
        code: String,
    },
    /// Forget the persisted locale
    Reset,
}

#[derive(Debug, Args)]
pub struct LocaleCommand {
    #[command(subcommand)]
    pub action: Option<LocaleAction>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the string at a key path, falling back to the default locale
    Get(LookupCommand),
    /// Print the structured value (array, object) at a key path as JSON
    Structured(LookupCommand),
    /// Show or change the persisted locale
    Locale(LocaleCommand),
    /// Check translation keys used in source code and locale coverage
    Check(CheckCommand),
    /// Initialize a new .lingorc.json configuration file
    Init,
}
