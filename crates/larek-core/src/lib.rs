//! # larek-core: Pure Domain Logic for the Web Larek Storefront
//!
//! This crate is the **heart** of the storefront. It owns the catalog, the
//! basket and the in-progress order, and announces every change on an
//! in-process event bus that the views listen to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Web Larek Storefront Architecture                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Views (apps/storefront)                      │   │
//! │  │    Page ──► Card ──► Basket ──► Order form ──► Contacts form    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ outbound events (card:select, ...)     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ larek-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   state   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  AppData  │  │   rules   │  │   │
//! │  │   │   Order   │  │           │  │  Basket   │  │  errors   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        ┌───────────┐                           │   │
//! │  │                        │  events   │ EventBus, Event           │   │
//! │  │                        └───────────┘                           │   │
//! │  │   NO I/O • NO NETWORK • SINGLE-THREADED                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ change events (items:change, ...)      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    larek-api (HTTP Layer)                       │   │
//! │  │              GET /product, GET /product/{id}, POST /order       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Basket, Order, form fields)
//! - [`money`] - Integer money type
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout form validation
//! - [`events`] - Typed event bus
//! - [`state`] - The application state container
//!
//! ## Example Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use larek_core::{AppData, EventBus, Money, Product};
//!
//! let bus = Rc::new(EventBus::new());
//! let mut app = AppData::new(bus.clone());
//!
//! let product = Product::new("1", "+1 час в сутках", Some(Money::from_units(750)));
//! app.add_to_basket(&product);
//!
//! assert!(app.in_basket(&product));
//! assert_eq!(app.basket().total, Money::from_units(750));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod events;
pub mod money;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use events::{Emitter, Event, EventBus, SubscriptionId};
pub use money::Money;
pub use state::AppData;
pub use types::*;
