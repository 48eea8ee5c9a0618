use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["messagesRoot", "defaultLocale", "locales", "storageKey", "includes"] {
        assert!(parsed.get(field).is_some(), "Config should have '{}' field", field);
    }
    assert_eq!(parsed["defaultLocale"], "en");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("\u{2713} Created .lingorc.json\n"));
    assert_config_content(&test.read_file(".lingorc.json")?)?;
    assert_eq!(test.read_file("messages/en.json")?, "{}\n");

    // The generated project is immediately usable.
    let output = test.run(&["locale"])?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("en\n"));
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lingorc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .lingorc.json already exists
    ");
    assert_eq!(test.read_file(".lingorc.json")?, "{}");
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage: lingo"));
    Ok(())
}
