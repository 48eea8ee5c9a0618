//! The closed set of locales an application supports.

use anyhow::{Result, bail};

/// Allow-list of locale codes plus the designated default locale.
///
/// Codes are compared exactly: `"en"` and `"EN"` are different codes.
/// The default locale is always a member of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    codes: Vec<String>,
    default: String,
}

impl SupportedLocales {
    /// Build an allow-list from `codes`, with `default` as the fallback locale.
    ///
    /// Fails if the list is empty, contains duplicates or blank codes, or
    /// does not contain `default`.
    pub fn new<I, S>(codes: I, default: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default = default.into();
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into();
            if code.trim().is_empty() {
                bail!("Locale codes must not be blank");
            }
            if out.contains(&code) {
                bail!("Duplicate locale code '{}'", code);
            }
            out.push(code);
        }

        if out.is_empty() {
            bail!("At least one locale must be supported");
        }
        if !out.contains(&default) {
            bail!(
                "Default locale '{}' is not in the supported locales [{}]",
                default,
                out.join(", ")
            );
        }

        Ok(Self {
            codes: out,
            default,
        })
    }

    pub fn default_locale(&self) -> &str {
        &self.default
    }

    pub fn is_default(&self, code: &str) -> bool {
        self.default == code
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// Supported codes in declaration order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Supported codes other than the default, in declaration order.
    pub fn non_default(&self) -> impl Iterator<Item = &str> {
        self.codes
            .iter()
            .map(String::as_str)
            .filter(|c| *c != self.default)
    }
}
