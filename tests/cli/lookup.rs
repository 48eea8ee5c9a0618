use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr};

#[test]
fn test_get_default_locale() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["get", "hero.title"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Welkom

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_falls_back_to_default_locale() -> Result<()> {
    let test = CliTest::with_messages()?;

    // Fallbacks are informational and stay quiet without -v.
    assert_cmd_snapshot!(test.command().args(["get", "hero.faqTitle", "--locale", "en"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Veelgestelde vragen

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_verbose_reports_fallback() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["get", "hero.faqTitle", "--locale", "en", "-v"])?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("fallback-used"));
    Ok(())
}

#[test]
fn test_get_missing_returns_path() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["get", "hero.nope"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    hero.nope

    ----- stderr -----
    warning: no string translation for 'hero.nope' (active locale 'nl')  missing-translation
    ");

    Ok(())
}

#[test]
fn test_get_array_is_not_a_string() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["get", "hero.faqs"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    hero.faqs

    ----- stderr -----
    warning: no string translation for 'hero.faqs' (active locale 'nl')  missing-translation
    ");

    Ok(())
}

#[test]
fn test_get_unsupported_locale() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["get", "hero.title", "--locale", "fr"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Welkom

    ----- stderr -----
    warning: unsupported locale 'fr'  invalid-locale
    ");

    Ok(())
}

#[test]
fn test_structured_uses_active_locale_array() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["structured", "hero.faqs", "--locale", "en"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [
      {
        "question": "What is it?",
        "answer": "A test."
      }
    ]

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_structured_falls_back_whole_value() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(
        test.command().args(["structured", "benefits.items", "--locale", "en"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "0": "Snel",
      "1": "Veilig"
    }

    ----- stderr -----
    "#
    );

    Ok(())
}

#[test]
fn test_structured_missing_is_empty_object() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["structured", "hero.nope"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    {}

    ----- stderr -----
    warning: no structured translation for 'hero.nope' (active locale 'nl')  missing-translation
    ");

    Ok(())
}

#[test]
fn test_lookup_without_messages_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["get", "hero.title"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    Ok(())
}
