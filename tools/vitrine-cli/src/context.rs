//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use vitrine_commerce::catalog::{Product, ProductVariations};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["vitrine.toml", ".vitrine.toml", "vitrine.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_file) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_file,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
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

    /// Config file in the working directory, if one exists.
    pub fn local_config_file(&self) -> Option<PathBuf> {
        CONFIG_NAMES
            .iter()
            .map(|name| self.cwd.join(name))
            .find(|path| path.exists())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Read the product catalog, from `path` or the configured file.
    pub fn load_catalog(&self, path: Option<&str>) -> Result<Vec<Product>> {
        let path = self.resolve_path(path.unwrap_or(&self.config.catalog.path));
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        tracing::debug!(path = %path.display(), products = products.len(), "loaded catalog");
        Ok(products)
    }

    /// Read variations for a product, from `path` or `<variations_dir>/<id>.json`.
    ///
    /// A product without a variations file has no variations.
    pub fn load_variations(&self, product: &Product, path: Option<&str>) -> Result<Option<ProductVariations>> {
        let path = match (path, self.config.catalog.variations_dir.as_deref()) {
            (Some(path), _) => self.resolve_path(path),
            (None, Some(dir)) => self.resolve_path(dir).join(format!("{}.json", product.id)),
            (None, None) => return Ok(None),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no variations file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read variations: {}", path.display()))?;
        let variations = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse variations: {}", path.display()))?;
        Ok(Some(variations))
    }
}
