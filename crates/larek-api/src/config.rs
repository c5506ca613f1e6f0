//! # API Configuration
//!
//! Where the storefront finds the shop API and its image CDN.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LAREK_API_ORIGIN=https://larek-api.nomoreparties.co                │
//! │     LAREK_TIMEOUT_SECS=10                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/web-larek/storefront.toml (Linux)                        │
//! │     ~/Library/Application Support/com.web-larek.storefront/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! origin = "https://larek-api.nomoreparties.co"
//! api_path = "/api/weblarek"
//! cdn_path = "/content/weblarek"
//! timeout_secs = 30
//! ```
//!
//! The API base is `origin + api_path`; product images live under
//! `origin + cdn_path`.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Environment variable overriding [`ApiConfig::origin`].
pub const ENV_API_ORIGIN: &str = "LAREK_API_ORIGIN";

/// Environment variable overriding [`ApiConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "LAREK_TIMEOUT_SECS";

/// Shop API client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host (+ optional port) shared by the API and the CDN.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path of the JSON API under the origin.
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Path of the image CDN under the origin.
    #[serde(default = "default_cdn_path")]
    pub cdn_path: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_origin() -> String {
    "https://larek-api.nomoreparties.co".to_string()
}

fn default_api_path() -> String {
    "/api/weblarek".to_string()
}

fn default_cdn_path() -> String {
    "/content/weblarek".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            origin: default_origin(),
            api_path: default_api_path(),
            cdn_path: default_cdn_path(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Creates a config pointing at `origin` with default paths.
    pub fn with_origin(origin: impl Into<String>) -> Self {
        ApiConfig {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        let origin = Url::parse(&self.origin)?;
        if origin.scheme() != "http" && origin.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "API origin must start with http:// or https://, got: {}",
                self.origin
            )));
        }

        for (name, path) in [("api_path", &self.api_path), ("cdn_path", &self.cdn_path)] {
            if !path.is_empty() && !path.starts_with('/') {
                return Err(ApiError::InvalidConfig(format!(
                    "{} must start with '/', got: {}",
                    name, path
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(ApiError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(origin) = lookup(ENV_API_ORIGIN) {
            debug!(origin = %origin, "Overriding API origin from environment");
            self.origin = origin;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric timeout in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "web-larek", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Derived URLs
    // =========================================================================

    /// Base URL of the JSON API.
    pub fn api_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.api_path)
    }

    /// Base URL prefixed onto every product image path.
    pub fn cdn_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.cdn_path)
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.api_url(),
            "https://larek-api.nomoreparties.co/api/weblarek"
        );
        assert_eq!(
            config.cdn_url(),
            "https://larek-api.nomoreparties.co/content/weblarek"
        );
    }

    #[test]
    fn test_trailing_slash_in_origin() {
        let config = ApiConfig::with_origin("http://localhost:3000/");
        assert_eq!(config.api_url(), "http://localhost:3000/api/weblarek");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::with_origin("ftp://example.com");
        assert!(config.validate().is_err());

        config.origin = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ApiError::InvalidUrl(_))));

        config.origin = "http://localhost:3000".to_string();
        assert!(config.validate().is_ok());

        config.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ApiError::InvalidConfig(_))));

        config.timeout_secs = 5;
        config.cdn_path = "content".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ApiConfig::default();
        config.apply_overrides(|key| match key {
            ENV_API_ORIGIN => Some("http://127.0.0.1:8080".to_string()),
            ENV_TIMEOUT_SECS => Some("soon".to_string()),
            _ => None,
        });

        assert_eq!(config.origin, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApiConfig = toml::from_str(r#"origin = "http://localhost:3000""#).unwrap();
        assert_eq!(config.origin, "http://localhost:3000");
        assert_eq!(config.api_path, "/api/weblarek");
        assert_eq!(config.timeout_secs, 30);
    }

    fn temp_config(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("larek-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("storefront.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_reads_file() {
        let path = temp_config("cdn_path = \"/images\"\ntimeout_secs = 7\n");

        let config = ApiConfig::load(Some(path.clone())).unwrap();

        assert_eq!(config.cdn_path, "/images");
        assert_eq!(config.timeout_secs, 7);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let path = temp_config("timeout_secs = \"soon\"\n");

        let err = ApiConfig::load(Some(path.clone())).unwrap_err();

        assert!(matches!(err, ApiError::ConfigLoadFailed(_)));
        assert!(err.is_config_error());
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
