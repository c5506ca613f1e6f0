//! # Application State
//!
//! `AppData` owns the catalog, the basket, the previewed product, the order
//! in progress and both checkout error maps. Every mutation is announced on
//! the injected [`Emitter`]; views never read or write this state directly.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐  set_order_field   ┌──────────┐  set_contacts_field      │
//! │  │  Empty   │───────────────────►│ Delivery │─────────────────────┐    │
//! │  │  Order   │  (every keystroke) │  valid   │  (every keystroke)  │    │
//! │  └──────────┘        │           └──────────┘                     ▼    │
//! │                      ▼                 │                  ┌──────────┐ │
//! │            validate_order()            │ items + total    │ Contacts │ │
//! │            formErrorsOrder:change      │ copied from      │  ready   │ │
//! │                                        │ the basket       └────┬─────┘ │
//! │                                        ▼                       │       │
//! │                                  finalize_order()        POST /order   │
//! │                                                                │       │
//! │                                                   clear_basket()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Basket Total
//! The total is a running cache: `add_to_basket` adds the item's price and
//! `remove_from_basket` subtracts it. It is never recomputed from the catalog,
//! so a price must not change between add and remove.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::events::{Emitter, Event};
use crate::types::{
    Basket, ContactsErrors, ContactsField, Order, OrderErrors, OrderField, PaymentMethod, Product,
};
use crate::validation;

/// The storefront's single state container.
///
/// Created once by the composition root and handed to every consumer that
/// needs it; there is no global instance.
pub struct AppData {
    items: Vec<Product>,
    basket: Basket,
    preview: Option<Product>,
    order: Order,
    order_errors: OrderErrors,
    contacts_errors: ContactsErrors,
    events: Rc<dyn Emitter>,
}

impl AppData {
    /// Creates an empty state bound to `events`.
    pub fn new(events: Rc<dyn Emitter>) -> Self {
        AppData {
            items: Vec::new(),
            basket: Basket::default(),
            preview: None,
            order: Order::default(),
            order_errors: OrderErrors::new(),
            contacts_errors: ContactsErrors::new(),
            events,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn preview(&self) -> Option<&Product> {
        self.preview.as_ref()
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn order_errors(&self) -> &OrderErrors {
        &self.order_errors
    }

    pub fn contacts_errors(&self) -> &ContactsErrors {
        &self.contacts_errors
    }

    /// Looks a product up in the catalog by id.
    pub fn find_item(&self, id: &str) -> Option<&Product> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Resolves every basket entry against the catalog, in basket order.
    ///
    /// ## Errors
    /// `ProductNotFound` if an entry no longer exists in the catalog.
    pub fn basket_products(&self) -> CoreResult<Vec<Product>> {
        self.basket
            .items
            .iter()
            .map(|id| {
                self.find_item(id)
                    .cloned()
                    .ok_or_else(|| CoreError::ProductNotFound(id.clone()))
            })
            .collect()
    }

    // =========================================================================
    // Catalog + Preview
    // =========================================================================

    /// Replaces the whole catalog and emits `items:change`.
    pub fn set_items(&mut self, items: Vec<Product>) {
        debug!(count = items.len(), "Catalog replaced");
        self.items = items;
        self.events.emit(Event::ItemsChanged(self.items.clone()));
    }

    /// Sets (or clears) the previewed product and emits `preview:change`.
    pub fn set_preview(&mut self, item: Option<Product>) {
        debug!(product_id = ?item.as_ref().map(|p| p.id.as_str()), "Preview changed");
        self.preview = item.clone();
        self.events.emit(Event::PreviewChanged(item));
    }

    // =========================================================================
    // Basket
    // =========================================================================

    /// Membership test by product id.
    pub fn in_basket(&self, item: &Product) -> bool {
        self.basket.contains(&item.id)
    }

    /// Appends the product and adds its price to the total.
    ///
    /// No duplicate check: callers toggle via [`in_basket`](Self::in_basket)
    /// first.
    pub fn add_to_basket(&mut self, item: &Product) {
        self.basket.items.push(item.id.clone());
        self.basket.total += item.price_or_zero();
        debug!(product_id = %item.id, total = self.basket.total.units(), "Added to basket");
        self.events.emit(Event::BasketChanged(Some(self.basket.clone())));
    }

    /// Removes every occurrence of the product and subtracts its price once.
    pub fn remove_from_basket(&mut self, item: &Product) {
        self.basket.items.retain(|id| id != &item.id);
        self.basket.total -= item.price_or_zero();
        debug!(product_id = %item.id, total = self.basket.total.units(), "Removed from basket");
        self.events.emit(Event::BasketChanged(Some(self.basket.clone())));
    }

    /// Empties the basket and emits a payload-less `basket:change`.
    pub fn clear_basket(&mut self) {
        self.basket = Basket::default();
        debug!("Basket cleared");
        self.events.emit(Event::BasketChanged(None));
    }

    // =========================================================================
    // Delivery Step
    // =========================================================================

    /// Sets the payment method. Emits nothing.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        debug!(payment = %method, "Payment method set");
        self.order.payment = method;
    }

    /// Assigns one delivery-step field, then re-finalizes the order if the
    /// step validates.
    ///
    /// ## Errors
    /// `InvalidPaymentMethod` if `field` is the payment selector and `value`
    /// is neither `card` nor `cash`; nothing is changed in that case.
    pub fn set_order_field(&mut self, field: OrderField, value: &str) -> CoreResult<()> {
        match field {
            OrderField::Payment => self.set_payment_method(value.parse()?),
            OrderField::Address => self.order.address = value.to_string(),
        }

        self.finalize_order();
        Ok(())
    }

    /// Copies the basket's items and total onto the order when the delivery
    /// step validates. Returns whether it did.
    ///
    /// Runs on every delivery keystroke and once more right before
    /// submission, so a basket edited while the form was open is never sent
    /// stale. The typed order always carries a payment method, so only the
    /// address check gates this.
    pub fn finalize_order(&mut self) -> bool {
        if !self.validate_order() {
            return false;
        }
        self.order.items = self.basket.items.clone();
        self.order.total = self.basket.total;
        debug!(
            items = self.order.items.len(),
            total = self.order.total.units(),
            "Order finalized from basket"
        );
        true
    }

    /// Recomputes the delivery errors, emits `formErrorsOrder:change`, and
    /// returns whether the step is valid.
    pub fn validate_order(&mut self) -> bool {
        self.order_errors = validation::validate_delivery(&self.order);
        self.events
            .emit(Event::OrderErrorsChanged(self.order_errors.clone()));
        self.order_errors.is_empty()
    }

    // =========================================================================
    // Contact Step
    // =========================================================================

    /// Assigns one contact-step field and validates; on success emits
    /// `contacts:ready` with the full order.
    pub fn set_contacts_field(&mut self, field: ContactsField, value: &str) {
        match field {
            ContactsField::Email => self.order.email = value.to_string(),
            ContactsField::Phone => self.order.phone = value.to_string(),
        }

        if self.validate_contacts() {
            self.events.emit(Event::ContactsReady(self.order.clone()));
        }
    }

    /// Recomputes the contact errors, emits `formErrorsContacts:change`, and
    /// returns whether the step is valid.
    pub fn validate_contacts(&mut self) -> bool {
        self.contacts_errors = validation::validate_contacts(&self.order);
        self.events
            .emit(Event::ContactsErrorsChanged(self.contacts_errors.clone()));
        self.contacts_errors.is_empty()
    }
}

impl fmt::Debug for AppData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppData")
            .field("items", &self.items.len())
            .field("basket", &self.basket)
            .field("preview", &self.preview.as_ref().map(|p| &p.id))
            .field("order", &self.order)
            .field("order_errors", &self.order_errors)
            .field("contacts_errors", &self.contacts_errors)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
