//! # Validation Module
//!
//! Checkout form validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  User types into a form field                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  AppData assigns the value onto the order                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: recompute the WHOLE error map for that step              │
//! │  ├── empty map   → step is valid, submit button enabled                │
//! │  └── non-empty   → messages joined with "; " under the form            │
//! │                                                                         │
//! │  Nothing is incremental: a stale error can never survive a recompute.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use larek_core::{Order, OrderField};
//! use larek_core::validation::validate_delivery;
//!
//! let order = Order::default();
//! let errors = validate_delivery(&order);
//! assert!(errors.contains_key(&OrderField::Address));
//! ```

use crate::types::{ContactsErrors, ContactsField, Order, OrderErrors, OrderField};

/// Message shown when the delivery address is missing.
pub const ADDRESS_REQUIRED: &str = "Укажите адрес";

/// Message shown when the email is missing.
pub const EMAIL_REQUIRED: &str = "Укажите email";

/// Message shown when the phone is missing.
pub const PHONE_REQUIRED: &str = "Укажите телефон";

/// Separator between messages in a form's error line.
pub const ERROR_SEPARATOR: &str = "; ";

// =============================================================================
// Step Validators
// =============================================================================

/// Validates the delivery step.
///
/// ## Rules
/// - `address` must not be empty
pub fn validate_delivery(order: &Order) -> OrderErrors {
    let mut errors = OrderErrors::new();

    if order.address.is_empty() {
        errors.insert(OrderField::Address, ADDRESS_REQUIRED.to_string());
    }

    errors
}

/// Validates the contact step.
///
/// ## Rules
/// - `email` must not be empty
/// - `phone` must not be empty
pub fn validate_contacts(order: &Order) -> ContactsErrors {
    let mut errors = ContactsErrors::new();

    if order.email.is_empty() {
        errors.insert(ContactsField::Email, EMAIL_REQUIRED.to_string());
    }

    if order.phone.is_empty() {
        errors.insert(ContactsField::Phone, PHONE_REQUIRED.to_string());
    }

    errors
}

/// Joins the messages of an error map into the single line a form displays.
pub fn join_errors<'a, I>(messages: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    messages
        .into_iter()
        .filter(|m| !m.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(ERROR_SEPARATOR)
}

// =============================================================================
// Unit Tests
// =============================================================================
