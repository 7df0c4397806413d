use crate::core::transform::DEFAULT_MIN_DISCOUNT;
use crate::core::{Category, ConfigProvider};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://api.mercadolibre.com/sites/MLA/search";
pub const DEFAULT_OUTPUT_FILE: &str = "smarphone500json.json";

/// Run configuration. Every section is optional in TOML and defaults to the stock feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub source: SourceConfig,
    pub categories: Vec<Category>,
    pub filter: FilterConfig,
    pub output: OutputConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub limit: usize,
    pub timeout_seconds: u64,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_discount: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub filename: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl Default for FeedConfig {
    /// Stock configuration: four categories, 10% threshold, output in the working directory.
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            categories: default_categories(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limit: 50,
            timeout_seconds: 30,
            headers: default_headers(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_discount: DEFAULT_MIN_DISCOUNT,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            filename: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

/// Browser-like headers; the search endpoint rejects bare clients more often.
pub fn default_headers() -> BTreeMap<String, String> {
    [
        (
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        ),
        ("Accept", "application/json"),
        ("Accept-Language", "es-ES,es;q=0.9,en;q=0.8"),
        ("Connection", "keep-alive"),
        ("Upgrade-Insecure-Requests", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Smartphones", "smartphone"),
        Category::new("Tablets", "tablet"),
        Category::new("Smartwatches", "smartwatch"),
        Category::new("Portátiles", "laptop"),
    ]
}

impl FeedConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after `${VAR}` substitution. An omitted `categories` key means the stock set;
    /// an explicit empty list is kept and rejected by validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_file_path(&self) -> String {
        Path::new(&self.output.path)
            .join(&self.output.filename)
            .to_string_lossy()
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for FeedConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn result_limit(&self) -> usize {
        self.source.limit
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn request_headers(&self) -> &BTreeMap<String, String> {
        &self.source.headers
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn min_discount(&self) -> f64 {
        self.filter.min_discount
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_filename(&self) -> &str {
        &self.output.filename
    }
}

impl Validate for FeedConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_positive_number("source.limit", self.source.limit, 1)?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.source.timeout_seconds as usize,
            1,
        )?;

        if self.categories.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "categories".to_string(),
            });
        }
        for category in &self.categories {
            validation::validate_non_empty_string("categories.name", &category.name)?;
            validation::validate_non_empty_string("categories.query", &category.query)?;
        }

        validation::validate_range("filter.min_discount", self.filter.min_discount, 0.0, 100.0)?;

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_path("output.filename", &self.output.filename)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_standard_feed() {
        let config = FeedConfig::from_toml_str("").unwrap();

        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.source.limit, 50);
        assert_eq!(config.source.timeout_seconds, 30);
        assert_eq!(config.categories, default_categories());
        assert_eq!(config.filter.min_discount, 10.0);
        assert_eq!(config.output.filename, DEFAULT_OUTPUT_FILE);
        assert!(config.source.headers.contains_key("User-Agent"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/search"
limit = 10
timeout_seconds = 5

[source.headers]
Accept = "application/json"

[[categories]]
name = "Consolas"
query = "consola"

[filter]
min_discount = 25.5

[output]
path = "./deals"
filename = "deals.json"

[monitoring]
enabled = true
"#;

        let config = FeedConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com/search");
        assert_eq!(config.result_limit(), 10);
        assert_eq!(config.request_headers().len(), 1);
        assert_eq!(config.categories(), &[Category::new("Consolas", "consola")]);
        assert_eq!(config.min_discount(), 25.5);
        assert!(config.monitoring_enabled());
        assert!(config.output_file_path().ends_with("deals.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DEALS_FEED_TEST_ENDPOINT", "https://test.api.com/search");

        let toml_content = r#"
[source]
endpoint = "${DEALS_FEED_TEST_ENDPOINT}"
"#;

        let config = FeedConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.endpoint, "https://test.api.com/search");

        std::env::remove_var("DEALS_FEED_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let mut config = FeedConfig::default();
        config.source.endpoint = "invalid-url".to_string();
        assert!(config.validate().is_err());

        let mut config = FeedConfig::default();
        config.source.limit = 0;
        assert!(config.validate().is_err());

        let mut config = FeedConfig::default();
        config.filter.min_discount = 120.0;
        assert!(config.validate().is_err());

        let mut config = FeedConfig::default();
        config.categories.clear();
        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_explicit_empty_categories_fail_validation() {
        let config = FeedConfig::from_toml_str("categories = []\n").unwrap();

        assert!(config.categories.is_empty());
        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = FeedConfig::from_toml_str("[source\nendpoint = ");
        assert!(matches!(
            result,
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nfilename = \"from-file.json\"\n")
            .unwrap();

        let config = FeedConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.filename, "from-file.json");
        assert_eq!(config.output.path, ".");
    }
}
