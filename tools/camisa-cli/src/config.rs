//! CLI configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use camisa_commerce::cart::{CheckoutLink, DEFAULT_CLOSING, DEFAULT_HEADER, DEFAULT_PHONE};
use camisa_commerce::catalog::SubcategoryTaxonomy;
use camisa_store::{BackoffStrategy, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["camisa.toml", ".camisa.toml", "camisa.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog data source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout link settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Fetch retry settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Subcategory names by category slug, replacing the built-in lists.
    #[serde(default)]
    pub taxonomy: BTreeMap<String, Vec<String>>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config content; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Checkout link built from the `[checkout]` section.
    pub fn checkout_link(&self) -> CheckoutLink {
        CheckoutLink::new(self.checkout.phone.clone())
            .with_header(self.checkout.header.clone())
            .with_closing(self.checkout.closing.clone())
    }

    /// Retry policy built from the `[fetch]` section.
    pub fn retry_policy(&self) -> RetryPolicy {
        if self.fetch.max_retries == 0 {
            return RetryPolicy::none();
        }
        let base = Duration::from_millis(self.fetch.backoff_ms);
        RetryPolicy::new(self.fetch.max_retries).with_backoff(BackoffStrategy::Exponential {
            base,
            max: base.saturating_mul(10),
        })
    }

    /// Taxonomy with overrides applied, plus the override slugs that matched nothing.
    pub fn taxonomy(&self) -> (SubcategoryTaxonomy, Vec<String>) {
        SubcategoryTaxonomy::default().with_overrides(&self.taxonomy)
    }
}

/// Catalog data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON snapshot with `categorias` and `productos`.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Base URL used for public image links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_data_file() -> String {
    "fixtures/catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            base_url: None,
        }
    }
}

/// Checkout link settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// WhatsApp number, digits only.
    #[serde(default = "default_phone")]
    pub phone: String,

    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_closing")]
    pub closing: String,
}

fn default_phone() -> String {
    DEFAULT_PHONE.to_string()
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

fn default_closing() -> String {
    DEFAULT_CLOSING.to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            phone: default_phone(),
            header: default_header(),
            closing: default_closing(),
        }
    }
}

/// Fetch retry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchConfig {
    /// Retries after the first failed fetch.
    #[serde(default)]
    pub max_retries: u32,

    /// Initial backoff in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_backoff_ms() -> u64 {
    50
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Generate a default camisa.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Camisa storefront configuration

[catalog]
data_file = "{data_file}"
# base_url = "https://your-project.supabase.co"

[checkout]
phone = "{phone}"
header = "{header}"
closing = "{closing}"

[fetch]
max_retries = 0
backoff_ms = 50

# Override subcategory names per category slug.
[taxonomy]
# estampadas = ["Anime y Manga", "Minimalistas"]
"#,
        data_file = default_data_file(),
        phone = DEFAULT_PHONE,
        header = DEFAULT_HEADER,
        closing = DEFAULT_CLOSING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use camisa_commerce::catalog::Category;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = CliConfig::parse("camisa.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CliConfig::parse(
            "camisa.toml",
            r#"
[checkout]
phone = "5215512345678"

[fetch]
max_retries = 3
"#,
        )
        .unwrap();

        assert_eq!(config.checkout.phone, "5215512345678");
        assert_eq!(config.checkout.header, DEFAULT_HEADER);
        assert_eq!(config.fetch.backoff_ms, 50);
        assert_eq!(config.retry_policy().max_retries, 3);
        assert_eq!(config.catalog.data_file, "fixtures/catalog.json");
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse("camisa.json", r#"{"fetch": {"max_retries": 1}}"#).unwrap();
        assert_eq!(config.fetch.max_retries, 1);
    }

    #[test]
    fn test_taxonomy_override() {
        let config = CliConfig::parse(
            "camisa.toml",
            r#"
[taxonomy]
bordadas = ["Escudos"]
zapatos = ["Tenis"]
"#,
        )
        .unwrap();

        let (taxonomy, unknown) = config.taxonomy();
        assert_eq!(taxonomy.names(Category::Embroidered), ["Escudos".to_string()]);
        assert_eq!(unknown, vec!["zapatos".to_string()]);
    }

    #[test]
    fn test_no_retries_by_default() {
        assert_eq!(CliConfig::default().retry_policy(), RetryPolicy::none());
    }

    #[test]
    fn test_checkout_link_from_config() {
        let link = CliConfig::default().checkout_link();
        assert_eq!(link, CheckoutLink::default());
    }
}
