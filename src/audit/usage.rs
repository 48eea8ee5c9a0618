//! Extraction of literal translation keys from source text.
//!
//! Only literal first arguments are collected: `t("hero.title")`,
//! `getStructured('hero.faqs')`, `` t(`nav.home`) ``. Computed keys are
//! invisible to this pass.

use std::{fmt, fs};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use regex::Regex;

use crate::core::NodeKind;

/// What kind of node an accessor needs the key to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expect {
    String,
    Any,
}

impl Expect {
    pub fn accepts(self, kind: NodeKind) -> bool {
        match self {
            Expect::String => kind == NodeKind::String,
            Expect::Any => true,
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::String => write!(f, "a string"),
            Expect::Any => write!(f, "any value"),
        }
    }
}

/// A literal key passed to an accessor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyUsage {
    pub file_path: String,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters, pointing at the key literal.
    pub col: usize,
    pub key: String,
    pub accessor: String,
    pub expects: Expect,
    /// The full source line containing the key, without its line break.
    pub source_line: String,
}

struct AccessorPattern {
    name: String,
    expects: Expect,
    regex: Regex,
}

/// Finds accessor calls with literal keys.
pub struct UsageExtractor {
    patterns: Vec<AccessorPattern>,
}

/// Whether `name` is usable as an accessor: identifiers joined by dots, e.g.
/// `t`, `getString`, `t.raw`.
pub fn is_valid_accessor(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
                _ => return false,
            }
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

impl UsageExtractor {
    pub fn new(string_accessors: &[String], structured_accessors: &[String]) -> Result<Self> {
        let mut patterns = Vec::new();
        let named = string_accessors
            .iter()
            .map(|n| (n, Expect::String))
            .chain(structured_accessors.iter().map(|n| (n, Expect::Any)));

        for (name, expects) in named {
            if !is_valid_accessor(name) {
                bail!("Invalid accessor name: \"{}\"", name);
            }
            // No look-behind in `regex`: require a non-identifier character
            // (or start of input) before the name instead.
            let pattern = format!(
                r#"(?:^|[^\w$.]){}\s*\(\s*(?:"([^"\\\n]*)"|'([^'\\\n]*)'|`([^`\\$\n]*)`)"#,
                regex::escape(name)
            );
            let regex = Regex::new(&pattern)
                .with_context(|| format!("Failed to build pattern for accessor \"{}\"", name))?;
            patterns.push(AccessorPattern {
                name: name.clone(),
                expects,
                regex,
            });
        }

        Ok(Self { patterns })
    }

    /// Usages in `content`, ordered by position.
    pub fn extract(&self, file_path: &str, content: &str) -> Vec<KeyUsage> {
        let line_index = build_line_index(content);
        let mut found: Vec<(usize, KeyUsage)> = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(content) {
                let Some(literal) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))
                else {
                    continue;
                };
                let key = literal.as_str();
                if key.is_empty() {
                    continue;
                }
                let offset = literal.start();
                let line = offset_to_line(&line_index, offset);
                let line_start = line_index[line - 1];
                let line_end = content[line_start..]
                    .find('\n')
                    .map_or(content.len(), |i| line_start + i);
                found.push((
                    offset,
                    KeyUsage {
                        file_path: file_path.to_string(),
                        line,
                        col: content[line_start..offset].chars().count() + 1,
                        key: key.to_string(),
                        accessor: pattern.name.clone(),
                        expects: pattern.expects,
                        source_line: content[line_start..line_end]
                            .trim_end_matches('\r')
                            .to_string(),
                    },
                ));
            }
        }

        found.sort_by_key(|(offset, _)| *offset);
        found.into_iter().map(|(_, usage)| usage).collect()
    }

    /// Read and extract every file in parallel. Unreadable files are
    /// returned separately with their error.
    pub fn extract_files<'a, I>(&self, files: I) -> (Vec<KeyUsage>, Vec<(String, String)>)
    where
        I: IntoParallelIterator<Item = &'a String>,
    {
        let results: Vec<std::result::Result<Vec<KeyUsage>, (String, String)>> = files
            .into_par_iter()
            .map(|path| {
                fs::read_to_string(path)
                    .map(|content| self.extract(path, &content))
                    .map_err(|e| (path.clone(), e.to_string()))
            })
            .collect();

        let mut usages = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(found) => usages.extend(found),
                Err(err) => errors.push(err),
            }
        }
        usages.sort();
        errors.sort();
        (usages, errors)
    }
}

/// Byte offsets at which each line starts. Line 1 starts at offset 0.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number for a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
