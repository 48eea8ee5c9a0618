use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod init;
mod locale;
mod lookup;

const BIN_NAME: &str = "lingo";

/// The two-locale project used by most tests: Dutch default, English
/// partially translated.
pub const NL_MESSAGES: &str = r#"{
  "hero": {
    "title": "Welkom",
    "faqTitle": "Veelgestelde vragen",
    "faqs": [
      { "question": "Wat is het?", "answer": "Een test." },
      { "question": "Kost het iets?", "answer": "Nee." }
    ]
  },
  "benefits": {
    "items": { "0": "Snel", "1": "Veilig" }
  }
}"#;

pub const EN_MESSAGES: &str = r#"{
  "hero": {
    "title": "Welcome",
    "faqs": [
      { "question": "What is it?", "answer": "A test." }
    ]
  }
}"#;

pub const CONFIG: &str = r#"{
  "defaultLocale": "nl",
  "locales": ["nl", "en"]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with `.lingorc.json`, `messages/nl.json` and `messages/en.json`.
    pub fn with_messages() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".lingorc.json", CONFIG)?;
        test.write_file("messages/nl.json", NL_MESSAGES)?;
        test.write_file("messages/en.json", EN_MESSAGES)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run `lingo <args>` and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {} {:?}", BIN_NAME, args))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
