//! # Storefront Error Type
//!
//! What the orchestration layer reports back from its network tasks.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog / submit_order                                           │
//! │         │                                                               │
//! │         ├── ApiError (transport, status, decode) ──► StorefrontError   │
//! │         ├── delivery step invalid ─────────────────► OrderIncomplete   │
//! │         └── submission already running ────────────► SubmitInProgress  │
//! │                                                                         │
//! │  Event handlers log the error with tracing::error! and leave the UI    │
//! │  as it was. Nothing is retried.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use larek_api::ApiError;
use thiserror::Error;

pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The shop API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Submission attempted while the delivery step does not validate.
    #[error("Order is incomplete: {0}")]
    OrderIncomplete(String),

    /// A previous submission has not finished yet.
    #[error("An order is already being submitted")]
    SubmitInProgress,
}

impl StorefrontError {
    /// Machine-readable code for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            StorefrontError::Api(ApiError::Server { .. }) => "SERVER_REJECTED",
            StorefrontError::Api(ApiError::Network(_)) => "NETWORK_ERROR",
            StorefrontError::Api(ApiError::Decode(_)) => "MALFORMED_RESPONSE",
            StorefrontError::Api(_) => "CONFIG_ERROR",
            StorefrontError::OrderIncomplete(_) => "ORDER_INCOMPLETE",
            StorefrontError::SubmitInProgress => "SUBMIT_IN_PROGRESS",
        }
    }
}
