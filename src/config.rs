use crate::model::{ConfigError, FilterThresholds};
use serde::Deserialize;
use std::fs;

pub const DEFAULT_API_BASE_URL: &str = "https://openapi.etsy.com/v3/application";
/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "SHOP_SPY_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub filters: FilterThresholds,
    #[serde(default)]
    pub show_all: bool,
    /// Listings (from the top of the catalog) that get a thumbnail lookup.
    #[serde(default = "default_thumbnail_limit")]
    pub thumbnail_limit: usize,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_output")]
    pub output: OutputFormat,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_thumbnail_limit() -> usize {
    80
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output() -> OutputFormat {
    OutputFormat::Text
}

impl AppConfig {
    /// Replaces the configured API key when an override is given.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Both credentials are required before any request is made.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.api_key = self.api_key.trim().to_string();
        self.store_name = self.store_name.trim().to_string();
        if self.api_key.is_empty() || self.store_name.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)?
        .with_api_key_override(std::env::var(API_KEY_ENV).ok())
        .validate()
}
