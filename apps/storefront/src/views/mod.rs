//! # Views
//!
//! Presentation models. Views hold only what they display and report user
//! actions as bus events; they never read or write `AppData`.
//!
//! ## Module Organization
//! ```text
//! views/
//! ├── page.rs     ◄─── Header counter, catalog gallery, scroll lock
//! ├── card.rs     ◄─── Product card (catalog / preview / basket row)
//! ├── basket.rs   ◄─── Basket modal body
//! ├── modal.rs    ◄─── Overlay with a swappable body
//! ├── form.rs     ◄─── Generic form + delivery and contact steps
//! └── success.rs  ◄─── Order accepted message
//! ```

pub mod basket;
pub mod card;
pub mod form;
pub mod modal;
pub mod page;
pub mod success;

pub use basket::BasketView;
pub use card::{Card, CardAction, CardLayout, ADD_LABEL, REMOVE_LABEL};
pub use form::{ContactsFormView, Form, FormState, OrderFormView};
pub use modal::{Modal, ModalContent};
pub use page::Page;
pub use success::Success;
