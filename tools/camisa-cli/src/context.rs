//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use camisa_commerce::catalog::Category;
use camisa_commerce::controller::CatalogController;
use camisa_store::MemoryStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the config file's directory, or the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            return PathBuf::from(path);
        }
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(self.cwd.as_path());
        base.join(path)
    }

    /// Open the configured catalog snapshot as an in-memory store.
    pub fn open_store(&self) -> Result<MemoryStore> {
        let path = self.resolve_path(&self.config.catalog.data_file);
        self.output.debug(&format!("Reading catalog from {}", path.display()));

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog data: {}", path.display()))?;
        let store = MemoryStore::from_json(&content)
            .with_context(|| format!("Failed to parse catalog data: {}", path.display()))?;
        tracing::info!(path = %path.display(), "opened catalog snapshot");

        Ok(match &self.config.catalog.base_url {
            Some(url) => store.with_base_url(url.clone()),
            None => store,
        })
    }

    /// Build a controller over the catalog and load every category.
    ///
    /// Sections that fail to load are reported and left empty.
    pub async fn load_catalog(&self) -> Result<CatalogController<MemoryStore>> {
        let store = Arc::new(self.open_store()?);
        let (taxonomy, unknown) = self.config.taxonomy();
        for slug in unknown {
            self.output
                .warn(&format!("Ignoring taxonomy override for unknown category '{}'", slug));
        }

        let mut catalog = CatalogController::new(store)
            .with_taxonomy(taxonomy)
            .with_retry(self.config.retry_policy());

        let spinner = self.output.spinner("Loading catalog...");
        let loaded = catalog.load_all().await;
        spinner.finish_and_clear();

        for category in Category::ALL {
            if let Some(err) = catalog.error(category) {
                self.output
                    .warn(&format!("{}: {}", category.display_name(), err));
            }
        }
        self.output
            .debug(&format!("Loaded {}/{} categories", loaded, Category::ALL.len()));

        Ok(catalog)
    }
}
