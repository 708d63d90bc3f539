//! # Configuration
//!
//! Client configuration: where the API lives. Browser bundles bake the value
//! in at build time; native hosts and tests may also load it from a file or
//! the environment.

use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(not(target_arch = "wasm32"))]
use std::{env, fs, path::PathBuf};

/// API address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7202/";

/// Environment variable (build-time for wasm, runtime for native) overriding
/// the API address.
pub const API_BASE_URL_ENV: &str = "IBNELVE_API_BASE_URL";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML file is malformed.
    #[error("invalid YAML configuration: {0}")]
    Yaml(String),

    /// The JSON file is malformed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not one we parse.
    #[error("Unsupported configuration format. Use 'yaml', 'yml' or 'json'.")]
    UnsupportedFormat,

    /// The API address is not an absolute http(s) URL.
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Configuration for the API clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address every API path is resolved against.
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Configuration baked in at compile time through `IBNELVE_API_BASE_URL`.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: option_env!("IBNELVE_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// The environment only overrides values the file left at their default.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, or the
    /// resulting address is invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_config(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::with_defaults();

        if let Some(path) = config_path {
            let content = fs::read_to_string(&path)?;
            config = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => serde_yml::from_str(&content)
                    .map_err(|err| ConfigError::Yaml(err.to_string()))?,
                Some("json") => serde_json::from_str(&content)?,
                _ => return Err(ConfigError::UnsupportedFormat),
            };
        }

        if config.api_base_url == DEFAULT_API_BASE_URL
            && let Ok(url) = env::var(API_BASE_URL_ENV)
        {
            config.api_base_url = url;
        }

        config.validate()?;
        tracing::debug!(api_base_url = %config.api_base_url, "client configuration loaded");
        Ok(config)
    }

    /// The API address as a URL ending in `/`, so relative paths nest under it.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] for relative or non-http(s) values.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason,
        };

        let mut url = Url::parse(self.api_base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url().map(|_| ())
    }
}
