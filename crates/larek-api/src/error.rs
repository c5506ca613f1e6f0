//! # API Error Types
//!
//! Error types for network and configuration operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Server {status, msg}   │ │
//! │  │  InvalidUrl     │  │  (DNS, TLS,     │  │  Decode                 │ │
//! │  │  ConfigLoad     │  │   timeout)      │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these are retried. The storefront logs them and leaves the    │
//! │  UI in its previous state.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong talking to the shop API.
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// API origin is not a usable http(s) URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// Non-2xx response. `message` is the server's `error` field when it sent
    /// one, otherwise the status reason.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body is not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ApiError {
    /// HTTP status of a server error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidConfig(_) | ApiError::InvalidUrl(_) | ApiError::ConfigLoadFailed(_)
        )
    }
}
