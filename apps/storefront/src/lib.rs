//! # larek-storefront: Views and Orchestration
//!
//! The composition root of the Web Larek storefront. Builds one event bus,
//! one [`AppData`](larek_core::AppData), the views and the API client, and
//! connects them.
//!
//! ## Module Organization
//! ```text
//! larek_storefront/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── storefront.rs   ◄─── Subscriptions and network tasks
//! ├── error.rs        ◄─── StorefrontError
//! └── views/          ◄─── Page, Card, BasketView, Modal, forms, Success
//! ```

pub mod error;
pub mod storefront;
pub mod views;

pub use error::{StorefrontError, StorefrontResult};
pub use storefront::Storefront;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,larek=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including every bus event
/// - `RUST_LOG=larek_core=trace` - Show dispatch traces from the bus
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
