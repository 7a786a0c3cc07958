//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vitrine_commerce::checkout::{CepRange, ShippingEstimator};
use vitrine_commerce::search::{SmartphoneExtractor, SortOption};
use vitrine_commerce::Currency;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Search page defaults.
    #[serde(default)]
    pub search: SearchConfig,

    /// Shipping estimate rules.
    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Currency used to format prices.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.catalog.currency)
            .with_context(|| format!("Unknown currency code: {}", self.catalog.currency))
    }

    /// Name matcher for the configured brand.
    pub fn extractor(&self) -> Result<SmartphoneExtractor> {
        SmartphoneExtractor::new(&self.search.brand)
            .with_context(|| format!("Invalid brand for model matching: {}", self.search.brand))
    }

    pub fn default_sort(&self) -> SortOption {
        SortOption::from_str(&self.search.default_sort)
    }

    /// Shipping rules priced in the catalog currency.
    pub fn estimator(&self) -> Result<ShippingEstimator> {
        Ok(ShippingEstimator {
            fast_ranges: self.shipping.fast_ranges.clone(),
            fast_days: self.shipping.fast_days,
            standard_days: self.shipping.standard_days,
            currency: self.currency()?,
        })
    }
}

/// Where products come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding an array of products.
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// Optional directory of `<product id>.json` variation files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations_dir: Option<String>,

    /// ISO currency code for prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

fn default_currency() -> String {
    "BRL".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            variations_dir: None,
            currency: default_currency(),
        }
    }
}

/// Search defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Brand name used to recognize models in product names.
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Sort applied when none is given.
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Maximum rows printed.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_brand() -> String {
    "iPhone".to_string()
}

fn default_sort() -> String {
    "relevance".to_string()
}

fn default_limit() -> usize {
    24
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            default_sort: default_sort(),
            limit: default_limit(),
        }
    }
}

/// Shipping rules and simulated quote latency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfig {
    #[serde(default = "default_fast_ranges")]
    pub fast_ranges: Vec<CepRange>,

    #[serde(default = "default_fast_days")]
    pub fast_days: u32,

    #[serde(default = "default_standard_days")]
    pub standard_days: u32,

    /// Delay before a quote is shown, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_fast_ranges() -> Vec<CepRange> {
    ShippingEstimator::default().fast_ranges
}

fn default_fast_days() -> u32 {
    ShippingEstimator::default().fast_days
}

fn default_standard_days() -> u32 {
    ShippingEstimator::default().standard_days
}

fn default_latency_ms() -> u64 {
    1500
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            fast_ranges: default_fast_ranges(),
            fast_days: default_fast_days(),
            standard_days: default_standard_days(),
            latency_ms: default_latency_ms(),
        }
    }
}

/// Log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Generate a default vitrine.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Vitrine catalog configuration

[catalog]
path = "{catalog_path}"
# variations_dir = "variations"
currency = "BRL"

[search]
brand = "iPhone"
default_sort = "relevance"
limit = 24

[shipping]
fast_days = 3
standard_days = 7
latency_ms = 1500

# Nordeste
[[shipping.fast_ranges]]
start = 40000000
end = 65999999

[log]
filter = "warn"
"#,
        catalog_path = catalog_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("data/produtos.json")).unwrap();
        assert_eq!(config.catalog.path, "data/produtos.json");
        assert_eq!(config.shipping.fast_ranges.len(), 1);
        assert_eq!(config.shipping.fast_ranges[0].start, 40_000_000);
        assert_eq!(config.search.limit, 24);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.catalog.path, "catalog.json");
        assert_eq!(config.currency().unwrap(), Currency::BRL);
        assert_eq!(config.default_sort(), SortOption::Relevance);
        assert_eq!(config.estimator().unwrap(), ShippingEstimator::default());
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        let config: CliConfig = toml::from_str("[catalog]\ncurrency = \"XYZ\"").unwrap();
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"search": {"brand": "Galaxy", "default_sort": "price_desc"}}"#;
        let config: CliConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_sort(), SortOption::PriceDesc);
        assert_eq!(config.extractor().unwrap().brand_prefix(), "GALAXY ");
    }
}
