//! Configuration management for the Edviron dashboard
//!
//! This module handles loading, validation, and management of
//! dashboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Environment variable that overrides `backend.base_url`
pub const BASE_URL_ENV: &str = "EDVIRON_API_BASE_URL";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// External backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the payments backend (e.g. http://localhost:3000)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Rows per page when the query string does not say otherwise
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Upper bound accepted from the query string
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Choices offered by the page size selector
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            page_sizes: default_page_sizes(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    1000
}

fn default_page_sizes() -> Vec<usize> {
    vec![10, 20, 50, 100]
}

/// Analytics sampling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Rows fetched for summary, status and monthly aggregates
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,
    /// Rows fetched for the chart dashboard
    #[serde(default = "default_dashboard_limit")]
    pub dashboard_limit: usize,
    /// Number of rows in the recent transactions widget
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sample_limit: default_sample_limit(),
            dashboard_limit: default_dashboard_limit(),
            recent_count: default_recent_count(),
        }
    }
}

fn default_sample_limit() -> usize {
    1000
}

fn default_dashboard_limit() -> usize {
    100
}

fn default_recent_count() -> usize {
    6
}

/// Theme settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    /// Dark mode for visitors without a theme cookie
    #[serde(default)]
    pub default_dark: bool,
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol printed before amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Analytics settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Theme settings
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: defaults are used and a warning is logged.
    /// `EDVIRON_API_BASE_URL` is applied on top of whatever was loaded.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_yaml(&content)?
        } else {
            log::warn!("Config file {} not found, using defaults", path.display());
            Config::default()
        };

        let config = config.with_base_url_override(std::env::var(BASE_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without touching the environment
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document is valid and means "all defaults"
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml { reason: e.to_string() })
    }

    /// Replace the backend base URL when an override is present and non-empty
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.backend.base_url = url;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base = self.backend.base_url.as_str();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.pagination.default_limit == 0 || self.pagination.default_limit > self.pagination.max_limit {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_limit".to_string(),
                reason: format!("Default limit must be between 1 and {}", self.pagination.max_limit),
            });
        }

        if self.pagination.page_sizes.is_empty() {
            return Err(ConfigError::MissingField {
                field: "pagination.page_sizes".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Backend base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.backend.base_url.trim_end_matches('/')
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Default path used by the CLI
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.yaml")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.backend.base_url, "http://localhost:3000");
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.pagination.page_sizes, vec![10, 20, 50, 100]);
        assert_eq!(config.analytics.sample_limit, 1000);
        assert_eq!(config.analytics.recent_count, 6);
        assert!(!config.theme.default_dark);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\nbackend:\n  base_url: https://api.example.com/\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.api_base(), "https://api.example.com");
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("  \n").unwrap();
        assert_eq!(config.server.port, 8082);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::InvalidYaml { .. })));
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_override() {
        let config = Config::default().with_base_url_override(Some("https://edviron.example".to_string()));
        assert_eq!(config.backend.base_url, "https://edviron.example");

        let config = Config::default().with_base_url_override(Some("   ".to_string()));
        assert_eq!(config.backend.base_url, "http://localhost:3000");

        let config = Config::default().with_base_url_override(None);
        assert_eq!(config.backend.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { ref field, .. }) if field == "server.port"));

        let mut config = Config::default();
        config.backend.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pagination.default_limit = 5000;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pagination.page_sizes.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/definitely/not/here/config.yaml").unwrap();
        assert_eq!(config.pagination.max_limit, 1000);
    }
}
