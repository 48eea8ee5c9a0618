//! Config, catalog and locale context for one CLI invocation.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;

use super::super::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::context::LocaleContext;
use crate::core::{Catalog, MemorySink};
use crate::store::FileStorage;

pub struct Project {
    pub config: Config,
    /// Directory relative config paths resolve against.
    pub root_dir: PathBuf,
    pub catalog: Arc<Catalog>,
    /// Collects engine diagnostics for the report.
    pub sink: Arc<MemorySink>,
}

impl Project {
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let start_dir = common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&start_dir)?;
        if !config_result.from_file {
            tracing::debug!("no .lingorc.json found, using default configuration");
        }

        let mut config = config_result.config;
        apply_overrides(&mut config, common);
        config.validate()?;

        let root_dir = config_result.root_dir;
        let messages_dir = config.messages_dir(&root_dir);
        let catalog = Catalog::load_dir(&messages_dir, config.supported_locales()?)?;
        for warning in catalog.warnings() {
            tracing::warn!("skipped {}: {}", warning.file_path, warning.error);
        }
        tracing::debug!(
            locales = catalog.len(),
            dir = %messages_dir.display(),
            "catalog loaded"
        );

        Ok(Self {
            config,
            root_dir,
            catalog: Arc::new(catalog),
            sink: Arc::new(MemorySink::new()),
        })
    }

    pub fn messages_dir(&self) -> PathBuf {
        self.config.messages_dir(&self.root_dir)
    }

    pub fn storage_file(&self) -> PathBuf {
        self.config.storage_file(&self.root_dir)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.config.source_dir(&self.root_dir)
    }

    /// A context backed by the project's storage file, with the persisted
    /// locale restored.
    pub fn context(&self) -> LocaleContext {
        LocaleContext::builder(self.catalog.clone())
            .storage(Arc::new(FileStorage::new(self.storage_file())))
            .storage_key(self.config.storage_key.clone())
            .sink(self.sink.clone())
            .init()
    }
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut Config, common: &CommonArgs) {
    if let Some(ref default_locale) = common.default_locale {
        config.default_locale = default_locale.clone();
        if !config.locales.contains(default_locale) {
            config.locales.push(default_locale.clone());
        }
    }
    if let Some(ref messages_root) = common.messages_root {
        config.messages_root = path_string(messages_root);
    }
    if let Some(ref storage_path) = common.storage_path {
        config.storage_path = path_string(storage_path);
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
