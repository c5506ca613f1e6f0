//! # larek-api: Network Layer for the Web Larek Storefront
//!
//! This crate fetches the catalog, places orders, and holds the settings
//! that say where the shop API lives.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Path                                     │
//! │                                                                         │
//! │  Storefront (orchestrator)                                             │
//! │        │  Rc<dyn StoreApi>                                              │
//! │        ▼                                                                │
//! │  ┌──────────────────┐     ┌──────────────────┐     ┌────────────────┐  │
//! │  │    LarekApi      │────►│   HttpClient     │────►│  Shop API      │  │
//! │  │                  │     │                  │     │                │  │
//! │  │ /product         │     │ reqwest + JSON   │     │ JSON / HTTPS   │  │
//! │  │ /product/{id}    │     │ X-Request-Id     │     │                │  │
//! │  │ /order           │     │ {error} bodies   │     │                │  │
//! │  │ CDN image rewrite│     │                  │     │                │  │
//! │  └──────────────────┘     └──────────────────┘     └────────────────┘  │
//! │           ▲                                                             │
//! │           │ ApiConfig (TOML + LAREK_* env)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - `StoreApi` trait and the `LarekApi` adapter
//! - [`config`] - Client configuration
//! - [`error`] - API error types
//! - [`http`] - JSON HTTP client

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{LarekApi, StoreApi};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpClient;
