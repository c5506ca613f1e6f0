//! # Error Types
//!
//! Domain-specific error types for larek-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  larek-core errors (this file)                                         │
//! │  └── CoreError        - Domain rule violations                         │
//! │                                                                         │
//! │  larek-api errors (separate crate)                                     │
//! │  └── ApiError         - Network / server / decode / config failures    │
//! │                                                                         │
//! │  Form validation is NOT an error: an empty error map means "valid"     │
//! │  and is rendered inline in the form.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product is not present in the loaded catalog.
    ///
    /// ## When This Occurs
    /// - A basket entry references an id the catalog no longer contains
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A form reported a field name it does not own.
    #[error("Unknown field '{field}' in form '{form}'")]
    UnknownField { form: String, field: String },

    /// Payment selector sent a value outside `card` / `cash`.
    #[error("Unknown payment method: '{0}'. Valid options: card, cash")]
    InvalidPaymentMethod(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
