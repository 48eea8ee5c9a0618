use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stdout};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", crate::NL_MESSAGES)?;
    test.write_file(
        "src/hero.tsx",
        r#"
export function Hero() {
  const faqs = getStructured("hero.faqs");
  return <h1>{t("hero.title")}</h1>;
}
"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("check"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file, 2 locale files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_unknown_key_fails() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(
        "src/hero.tsx",
        "export const Title = () => <h1>{t('hero.titel')}</h1>;\n",
    )?;

    assert_cmd_snapshot!(test.command().args(["check", "keys"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "hero.titel" does not exist in the default locale  unknown-key
      --> ./src/hero.tsx:1:36
      |
    1 | export const Title = () => <h1>{t('hero.titel')}</h1>;
      |                                    ^

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_kind_mismatch_is_warning() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("app/faq.tsx", "const faqs = t('hero.faqs');\n")?;

    assert_cmd_snapshot!(test.command().args(["check", "keys"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "hero.faqs" resolves to an array but t() expects a string  kind-mismatch
      --> ./app/faq.tsx:1:17
      |
    1 | const faqs = t('hero.faqs');
      |                 ^

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_coverage() -> Result<()> {
    let test = CliTest::with_messages()?;

    assert_cmd_snapshot!(test.command().args(["check", "coverage"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "benefits.items" missing in 'en', default locale will be served  fallback-gap
      --> ./messages/en.json
      = hint: add the key to this locale to stop falling back

    warning: "hero.faqTitle" missing in 'en', default locale will be served  fallback-gap
      --> ./messages/en.json
      = hint: add the key to this locale to stop falling back

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_coverage_reports_shape_drift() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(
        "messages/en.json",
        r#"{
  "hero": {
    "title": "Welcome",
    "faqTitle": "Frequently asked questions",
    "faqs": "Coming soon"
  },
  "benefits": {
    "items": { "0": "Fast", "1": "Safe" }
  }
}"#,
    )?;

    assert_cmd_snapshot!(test.command().args(["check", "coverage"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: "hero.faqs" is a string in 'en' but an array in the default locale  shape-drift
      --> ./messages/en.json

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_check_skips_test_files() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", crate::NL_MESSAGES)?;
    test.write_file("src/hero.test.tsx", "t('not.a.key');\n")?;

    assert_cmd_snapshot!(test.command().arg("check"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 0 source files, 2 locale files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_check_custom_accessors() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", crate::NL_MESSAGES)?;
    test.write_file(
        ".lingorc.json",
        r#"{
  "defaultLocale": "nl",
  "locales": ["nl", "en"],
  "stringAccessors": ["i18n.text"],
  "structuredAccessors": []
}"#,
    )?;
    test.write_file("src/a.ts", "i18n.text('hero.gone');\nt('also.gone');\n")?;

    let output = test.run(&["check", "keys"])?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("\"hero.gone\""));
    assert!(!out.contains("also.gone"));
    Ok(())
}
