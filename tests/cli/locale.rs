use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_locale_defaults_without_preference() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().arg("locale"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    nl
    default: nl, supported: nl, en

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_locale_set_survives_restart() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["locale", "set", "en"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} Locale set to 'en'\n");

    let stored: Value = serde_json::from_str(&test.read_file(".lingo/storage.json")?)?;
    assert_eq!(stored, json!({ "lingo.locale": "en" }));

    // Every later invocation restores the saved locale.
    let output = test.run(&["locale"])?;
    assert!(stdout(&output).starts_with("en\n"));

    let output = test.run(&["get", "hero.title"])?;
    assert_eq!(stdout(&output), "Welcome\n");

    let output = test.run(&["get", "hero.faqTitle"])?;
    assert_eq!(stdout(&output), "Veelgestelde vragen\n");
    Ok(())
}

#[test]
fn test_locale_set_unsupported_is_rejected() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["locale", "set", "fr"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ Locale 'fr' is not supported, keeping 'nl'

    ----- stderr -----
    warning: unsupported locale 'fr'  invalid-locale
    ");
    assert!(!test.root().join(".lingo/storage.json").exists());
    Ok(())
}

#[test]
fn test_locale_reset() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.run(&["locale", "set", "en"])?;

    assert_cmd_snapshot!(test.command().args(["locale", "reset"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Locale preference cleared, 'nl' will be used

    ----- stderr -----
    ");

    let output = test.run(&["get", "hero.title"])?;
    assert_eq!(stdout(&output), "Welkom\n");
    Ok(())
}

#[test]
fn test_stored_locale_outside_allow_list_is_ignored() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(".lingo/storage.json", r#"{ "lingo.locale": "de" }"#)?;

    let output = test.run(&["get", "hero.title"])?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Welkom\n");
    Ok(())
}

#[test]
fn test_corrupt_storage_falls_back_to_default() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(".lingo/storage.json", "not json")?;

    let output = test.run(&["get", "hero.title"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Welkom\n");
    assert!(stderr(&output).contains("persistence-failed"));

    // The next save replaces the corrupt file.
    let output = test.run(&["locale", "set", "en"])?;
    assert!(output.status.success());
    let output = test.run(&["get", "hero.title"])?;
    assert_eq!(stdout(&output), "Welcome\n");
    Ok(())
}

#[test]
fn test_locale_set_reports_unwritable_storage() -> Result<()> {
    let test = CliTest::with_messages()?;
    // A directory where the storage file should be makes every write fail.
    std::fs::create_dir_all(test.root().join(".lingo/storage.json"))?;

    let output = test.run(&["locale", "set", "en"])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "\u{2718} Locale set to 'en' for this run only, it could not be saved\n"
    );
    assert!(stderr(&output).contains("persistence-failed"));
    Ok(())
}

#[test]
fn test_custom_storage_key() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(
        ".lingorc.json",
        r#"{ "defaultLocale": "nl", "locales": ["nl", "en"], "storageKey": "site.lang" }"#,
    )?;

    test.run(&["locale", "set", "en"])?;

    let stored: Value = serde_json::from_str(&test.read_file(".lingo/storage.json")?)?;
    assert_eq!(stored, json!({ "site.lang": "en" }));
    Ok(())
}
