//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/ups.toml
//!
//! Only the transport is configurable. The stage vocabulary, default stage
//! and date format are compiled in.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/ups.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CarrierConfig {
    /// Public tracking page, fetched first for session cookies.
    /// `{tracking_id}` is substituted.
    #[serde(default = "default_tracking_page_url")]
    pub tracking_page_url: String,
    /// JSON status endpoint
    #[serde(default = "default_status_url")]
    pub status_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_requester")]
    pub requester: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            tracking_page_url: default_tracking_page_url(),
            status_url: default_status_url(),
            locale: default_locale(),
            requester: default_requester(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_tracking_page_url() -> String {
    "https://www.ups.com/track?loc=en&tracknum={tracking_id}&requester=WT/trackdetails".to_string()
}

fn default_status_url() -> String {
    "https://www.ups.com/track/api/Track/GetStatus?loc=en_US".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_requester() -> String {
    "wt/trackdetails".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/100.0.4896.60 Safari/537.36"
        .to_string()
}

fn default_accept_language() -> String {
    "en-GB,en;q=0.9".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: default_timeout_ms() }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub carrier: CarrierConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    tracking_page_url: String,
    status_url: String,
    locale: String,
    requester: String,
    user_agent: String,
    accept_language: String,
    http_timeout_ms: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        let carrier = toml_config.carrier;
        Self {
            tracking_page_url: carrier.tracking_page_url,
            status_url: carrier.status_url,
            locale: carrier.locale,
            requester: carrier.requester,
            user_agent: carrier.user_agent,
            accept_language: carrier.accept_language,
            http_timeout_ms: toml_config.http.timeout_ms,
            config_file,
        }
    }

    /// Determine config file path from the CLI flag or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        DEFAULT_CONFIG_PATH.to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_defaults_used");
                Self::default()
            }
        }
    }

    /// Tracking page URL for one tracking id
    pub fn tracking_page_url_for(&self, tracking_id: &str) -> String {
        self.tracking_page_url.replace("{tracking_id}", tracking_id)
    }

    pub fn tracking_page_url(&self) -> &str {
        &self.tracking_page_url
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn requester(&self) -> &str {
        &self.requester
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    pub fn http_timeout_ms(&self) -> u64 {
        self.http_timeout_ms
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to point the transport at another host
    #[cfg(test)]
    pub fn with_tracking_page_url(mut self, url: &str) -> Self {
        self.tracking_page_url = url.to_string();
        self
    }

    /// Builder method for tests to shorten the HTTP timeout
    #[cfg(test)]
    pub fn with_http_timeout_ms(mut self, ms: u64) -> Self {
        self.http_timeout_ms = ms;
        self
    }
}
