//! Loading and holding the translation trees of every supported locale.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::core::locale::SupportedLocales;
use crate::core::tree::TranslationTree;

/// A message file that was found but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub file_path: String,
    pub error: String,
}

/// Translation trees keyed by locale code. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    locales: SupportedLocales,
    trees: HashMap<String, TranslationTree>,
    warnings: Vec<LoadWarning>,
}

impl Catalog {
    /// Build a catalog from in-memory trees.
    ///
    /// The default locale must have a tree. Trees for locales outside the
    /// allow-list are rejected.
    pub fn from_trees<I>(locales: SupportedLocales, trees: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, TranslationTree)>,
    {
        let mut map = HashMap::new();
        for (locale, tree) in trees {
            if !locales.contains(&locale) {
                bail!("Tree supplied for unsupported locale '{}'", locale);
            }
            map.insert(locale, tree);
        }

        if !map.contains_key(locales.default_locale()) {
            bail!(
                "No translations for default locale '{}'",
                locales.default_locale()
            );
        }

        Ok(Self {
            locales,
            trees: map,
            warnings: Vec::new(),
        })
    }

    /// Load `<locale>.json` files from `dir`.
    ///
    /// Unsupported locales are skipped and unreadable or malformed files
    /// become [`LoadWarning`]s. Only a missing directory or a missing default
    /// locale file is fatal.
    pub fn load_dir(dir: impl AsRef<Path>, locales: SupportedLocales) -> Result<Self> {
        let dir = dir.as_ref();

        if !dir.exists() {
            bail!(
                "Messages directory '{}' does not exist.\n\
                 Hint: Check your .lingorc.json 'messagesRoot' setting.",
                dir.display()
            );
        }
        if !dir.is_dir() {
            bail!("'{}' is not a directory.", dir.display());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut trees = HashMap::new();
        let mut warnings = Vec::new();

        for path in paths {
            let Some(locale) = extract_locale(&path) else {
                continue;
            };
            if !locales.contains(&locale) {
                tracing::warn!(
                    file = %path.display(),
                    %locale,
                    "skipping messages for unsupported locale"
                );
                continue;
            }

            match parse_tree_file(&path) {
                Ok(tree) => {
                    tracing::debug!(%locale, file = %path.display(), "loaded translations");
                    trees.insert(locale, tree);
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), "{:#}", e);
                    warnings.push(LoadWarning {
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        if !trees.contains_key(locales.default_locale()) {
            bail!(
                "Default locale '{}' messages not found in '{}'",
                locales.default_locale(),
                dir.display()
            );
        }

        Ok(Self {
            locales,
            trees,
            warnings,
        })
    }

    pub fn locales(&self) -> &SupportedLocales {
        &self.locales
    }

    /// Tree for `locale`, if one was loaded.
    pub fn tree(&self, locale: &str) -> Option<&TranslationTree> {
        self.trees.get(locale)
    }

    pub fn default_tree(&self) -> &TranslationTree {
        // The constructors refuse catalogs without a default tree.
        &self.trees[self.locales.default_locale()]
    }

    /// Number of locales with a tree.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}

/// Locale code from a message file name: `messages/nl.json` -> `nl`.
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn parse_tree_file(path: &Path) -> Result<TranslationTree> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    TranslationTree::from_json_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))
}
