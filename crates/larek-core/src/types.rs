//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Basket      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  items (ids)    │──►│  items, total   │       │
//! │  │  title          │   │  total (cache)  │   │  payment        │       │
//! │  │  category       │   └─────────────────┘   │  address        │       │
//! │  │  price: Option  │                         │  email, phone   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentMethod   │   │   OrderField    │   │  ContactsField  │       │
//! │  │  Card | Cash    │   │ Payment|Address │   │  Email | Phone  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Products are identified by `id` alone and are immutable once loaded.
//! The basket and the order refer to products by id only.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier assigned by the shop API.
    pub id: String,

    /// Long description shown in the preview.
    #[serde(default)]
    pub description: String,

    /// Image path. Absolute once the API adapter has prefixed the CDN origin.
    #[serde(default)]
    pub image: String,

    /// Display name.
    pub title: String,

    /// Category name (e.g. "софт-скил").
    #[serde(default)]
    pub category: String,

    /// Price, or `None` for items that cannot be bought.
    pub price: Option<Money>,
}

impl Product {
    /// Creates a product with only the fields the basket cares about.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Option<Money>) -> Self {
        Product {
            id: id.into(),
            description: String::new(),
            image: String::new(),
            title: title.into(),
            category: String::new(),
            price,
        }
    }

    /// Returns true if the product has a price and may enter the basket.
    #[inline]
    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }

    /// Price used for basket arithmetic; a missing price counts as zero.
    #[inline]
    pub fn price_or_zero(&self) -> Money {
        self.price.unwrap_or_default()
    }
}

/// Envelope returned by `GET /product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub total: u32,
    pub items: Vec<Product>,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Online card payment.
    #[default]
    Card,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(CoreError::InvalidPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Basket
// =============================================================================

/// The user's current selection.
///
/// ## Invariants
/// - `items` holds unique product ids, in insertion order
/// - `total` is a running cache equal to the sum of the listed items' prices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub items: Vec<String>,
    pub total: Money,
}

impl Basket {
    /// Number of entries (drives the header counter).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }
}

// =============================================================================
// Order
// =============================================================================

/// The order being assembled across the two checkout steps.
///
/// Serializes to exactly the `POST /order` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<String>,
    pub total: Money,
}

/// Successful response of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: String,
    pub total: Money,
}

// =============================================================================
// Form Fields
// =============================================================================

/// Fields of the delivery step ("order" form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Payment => "payment",
            OrderField::Address => "address",
        }
    }
}

impl FromStr for OrderField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(OrderField::Payment),
            "address" => Ok(OrderField::Address),
            other => Err(CoreError::UnknownField {
                form: ORDER_FORM.to_string(),
                field: other.to_string(),
            }),
        }
    }
}

/// Fields of the contact step ("contacts" form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactsField {
    Email,
    Phone,
}

impl ContactsField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactsField::Email => "email",
            ContactsField::Phone => "phone",
        }
    }
}

impl FromStr for ContactsField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ContactsField::Email),
            "phone" => Ok(ContactsField::Phone),
            other => Err(CoreError::UnknownField {
                form: CONTACTS_FORM.to_string(),
                field: other.to_string(),
            }),
        }
    }
}

/// Form name of the delivery step, used as the event prefix.
pub const ORDER_FORM: &str = "order";

/// Form name of the contact step, used as the event prefix.
pub const CONTACTS_FORM: &str = "contacts";

/// Delivery-step errors; an absent key means the field is fine.
pub type OrderErrors = BTreeMap<OrderField, String>;

/// Contact-step errors; an absent key means the field is fine.
pub type ContactsErrors = BTreeMap<ContactsField, String>;

// =============================================================================
// Form State + Partial Updates
// =============================================================================

/// Input values shown by the delivery form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryForm {
    pub payment: PaymentMethod,
    pub address: String,
}

/// Input values shown by the contacts form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactsForm {
    pub email: String,
    pub phone: String,
}

/// Partial update for [`DeliveryForm`]. Only present fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryFormPatch {
    pub payment: Option<PaymentMethod>,
    pub address: Option<String>,
}

impl DeliveryFormPatch {
    pub fn apply_to(self, form: &mut DeliveryForm) {
        if let Some(payment) = self.payment {
            form.payment = payment;
        }
        if let Some(address) = self.address {
            form.address = address;
        }
    }
}

/// Partial update for [`ContactsForm`]. Only present fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactsFormPatch {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactsFormPatch {
    pub fn apply_to(self, form: &mut ContactsForm) {
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("Cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("crypto".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_default() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Card);
    }

    #[test]
    fn test_product_deserializes_null_price() {
        let json = r#"{
            "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
            "description": "Если планируете решать задачи в тренажёре, берите два.",
            "image": "/5_Dots.svg",
            "title": "+1 час в сутках",
            "category": "софт-скил",
            "price": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, None);
        assert!(!product.is_purchasable());
        assert!(product.price_or_zero().is_zero());
    }

    #[test]
    fn test_order_wire_format() {
        let order = Order {
            payment: PaymentMethod::Cash,
            email: "a@b.com".to_string(),
            phone: "1".to_string(),
            address: "x".to_string(),
            items: vec!["1".to_string()],
            total: Money::from_units(500),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "payment": "cash",
                "email": "a@b.com",
                "phone": "1",
                "address": "x",
                "items": ["1"],
                "total": 500
            })
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!("address".parse::<OrderField>().unwrap(), OrderField::Address);
        assert_eq!("phone".parse::<ContactsField>().unwrap(), ContactsField::Phone);
        assert!("email".parse::<OrderField>().is_err());
        assert_eq!(OrderField::Payment.as_str(), "payment");
    }

    #[test]
    fn test_error_map_serializes_by_field_name() {
        let mut errors = OrderErrors::new();
        errors.insert(OrderField::Address, "Укажите адрес".to_string());
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"address":"Укажите адрес"}"#);
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut form = DeliveryForm {
            payment: PaymentMethod::Cash,
            address: "old".to_string(),
        };
        DeliveryFormPatch {
            payment: None,
            address: Some("new".to_string()),
        }
        .apply_to(&mut form);

        assert_eq!(form.payment, PaymentMethod::Cash);
        assert_eq!(form.address, "new");

        let mut contacts = ContactsForm::default();
        ContactsFormPatch {
            email: Some("a@b.com".to_string()),
            phone: None,
        }
        .apply_to(&mut contacts);
        assert_eq!(contacts.email, "a@b.com");
        assert_eq!(contacts.phone, "");
    }
}
