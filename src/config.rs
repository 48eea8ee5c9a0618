use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::audit::usage::is_valid_accessor;
use crate::core::SupportedLocales;
use crate::store::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root", alias = "messagesDir")]
    pub messages_root: String,
    #[serde(default = "default_default_locale", alias = "primaryLocale")]
    pub default_locale: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_string_accessors")]
    pub string_accessors: Vec<String>,
    #[serde(default = "default_structured_accessors")]
    pub structured_accessors: Vec<String>,
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_default_locale() -> String {
    "en".to_string()
}

fn default_locales() -> Vec<String> {
    vec![default_default_locale()]
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_storage_path() -> String {
    "./.lingo/storage.json".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    ["src", "app", "components"].map(String::from).to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_string_accessors() -> Vec<String> {
    ["t", "getString"].map(String::from).to_vec()
}

fn default_structured_accessors() -> Vec<String> {
    ["getStructured", "t.raw"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            default_locale: default_default_locale(),
            locales: default_locales(),
            storage_key: default_storage_key(),
            storage_path: default_storage_path(),
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            string_accessors: default_string_accessors(),
            structured_accessors: default_structured_accessors(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.supported_locales()?;

        if self.storage_key.trim().is_empty() {
            bail!("'storageKey' must not be empty");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths, so names
        // like `app/[locale]` are valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        let mut seen = HashSet::new();
        for name in self
            .string_accessors
            .iter()
            .chain(self.structured_accessors.iter())
        {
            if !is_valid_accessor(name) {
                bail!("Invalid accessor name: \"{}\"", name);
            }
            if !seen.insert(name.as_str()) {
                bail!("Accessor \"{}\" is listed more than once", name);
            }
        }

        Ok(())
    }

    pub fn supported_locales(&self) -> Result<SupportedLocales> {
        SupportedLocales::new(self.locales.iter().cloned(), self.default_locale.clone())
            .context("Invalid 'locales' / 'defaultLocale' configuration")
    }

    pub fn messages_dir(&self, root_dir: &Path) -> PathBuf {
        resolve_path(root_dir, &self.messages_root)
    }

    pub fn storage_file(&self, root_dir: &Path) -> PathBuf {
        resolve_path(root_dir, &self.storage_path)
    }

    pub fn source_dir(&self, root_dir: &Path) -> PathBuf {
        resolve_path(root_dir, &self.source_root)
    }
}

/// Resolve a configured path against the directory the config was found in.
fn resolve_path(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against.
    pub root_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
