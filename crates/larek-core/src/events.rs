//! # Event Bus
//!
//! In-process, synchronous publish/subscribe between the state container and
//! the views.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      EventBus Delivery                                  │
//! │                                                                         │
//! │  emit(event) ──► queue ──► for each subscription, in registration      │
//! │                              order, whose matcher accepts the name:     │
//! │                                                                         │
//! │     Exact("basket:change")          name == key                         │
//! │     Predicate(|name| ...)           any string test, no regex baked in  │
//! │     All                             every event (diagnostics)           │
//! │                                                                         │
//! │  Run-to-completion: an event emitted from inside a handler is queued   │
//! │  and delivered right after the current event has reached every         │
//! │  subscriber. The outermost emit() returns only once the queue is empty.│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queuing nested emits means a handler can hold a mutable borrow of shared
//! state while it mutates it, and the handlers reacting to that mutation see
//! the settled state afterwards.
//!
//! ## Usage
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use larek_core::events::{names, Event, EventBus};
//!
//! let bus = EventBus::new();
//! let opened = Rc::new(Cell::new(0));
//!
//! let counter = opened.clone();
//! bus.on(names::BASKET_OPEN, move |_| counter.set(counter.get() + 1));
//!
//! bus.emit(Event::BasketOpened);
//! assert_eq!(opened.get(), 1);
//! ```

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::types::{Basket, ContactsErrors, Order, OrderErrors, Product};

// =============================================================================
// Event Names
// =============================================================================

/// Wire names of the bus events.
pub mod names {
    pub const ITEMS_CHANGE: &str = "items:change";
    pub const PREVIEW_CHANGE: &str = "preview:change";
    pub const BASKET_CHANGE: &str = "basket:change";
    pub const ORDER_ERRORS_CHANGE: &str = "formErrorsOrder:change";
    pub const CONTACTS_ERRORS_CHANGE: &str = "formErrorsContacts:change";
    pub const CONTACTS_READY: &str = "contacts:ready";
    pub const CARD_SELECT: &str = "card:select";
    pub const BASKET_OPEN: &str = "basket:open";
    pub const ORDER_OPEN: &str = "order:open";
    pub const ORDER_SUBMIT: &str = "order:submit";
    pub const CONTACTS_SUBMIT: &str = "contacts:submit";
    pub const MODAL_OPEN: &str = "modal:open";
    pub const MODAL_CLOSE: &str = "modal:close";
}

// =============================================================================
// Event
// =============================================================================

/// Everything that travels over the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `items:change`: the catalog was replaced.
    ItemsChanged(Vec<Product>),
    /// `preview:change`: the previewed product changed (`None` clears it).
    PreviewChanged(Option<Product>),
    /// `basket:change`: the basket changed. `None` means "re-read the basket".
    BasketChanged(Option<Basket>),
    /// `formErrorsOrder:change`
    OrderErrorsChanged(OrderErrors),
    /// `formErrorsContacts:change`
    ContactsErrorsChanged(ContactsErrors),
    /// `contacts:ready`: the contact step validated; carries the full order.
    ContactsReady(Order),
    /// `card:select`
    CardSelected(Product),
    /// `basket:open`
    BasketOpened,
    /// `order:open`
    OrderOpened,
    /// `{form}:submit`
    FormSubmitted { form: String },
    /// `modal:open`
    ModalOpened,
    /// `modal:close`
    ModalClosed,
    /// `{form}.{field}:change`
    FieldChanged {
        form: String,
        field: String,
        value: String,
    },
}

impl Event {
    /// Returns the name subscriptions are matched against.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Event::ItemsChanged(_) => Cow::Borrowed(names::ITEMS_CHANGE),
            Event::PreviewChanged(_) => Cow::Borrowed(names::PREVIEW_CHANGE),
            Event::BasketChanged(_) => Cow::Borrowed(names::BASKET_CHANGE),
            Event::OrderErrorsChanged(_) => Cow::Borrowed(names::ORDER_ERRORS_CHANGE),
            Event::ContactsErrorsChanged(_) => Cow::Borrowed(names::CONTACTS_ERRORS_CHANGE),
            Event::ContactsReady(_) => Cow::Borrowed(names::CONTACTS_READY),
            Event::CardSelected(_) => Cow::Borrowed(names::CARD_SELECT),
            Event::BasketOpened => Cow::Borrowed(names::BASKET_OPEN),
            Event::OrderOpened => Cow::Borrowed(names::ORDER_OPEN),
            Event::FormSubmitted { form } => Cow::Owned(format!("{}:submit", form)),
            Event::ModalOpened => Cow::Borrowed(names::MODAL_OPEN),
            Event::ModalClosed => Cow::Borrowed(names::MODAL_CLOSE),
            Event::FieldChanged { form, field, .. } => {
                Cow::Owned(format!("{}.{}:change", form, field))
            }
        }
    }
}

/// Builds a predicate matching `{form}.{field}:change` for any field of `form`.
///
/// The field part may not contain `:`.
pub fn field_change_of(form: &str) -> impl Fn(&str) -> bool + 'static {
    let prefix = format!("{}.", form);
    move |name: &str| {
        name.strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(":change"))
            .is_some_and(|field| !field.is_empty() && !field.contains(':'))
    }
}

// =============================================================================
// Emitter
// =============================================================================

/// Anything events can be sent to.
///
/// The state container depends on this trait rather than on the bus, so it
/// can be driven in isolation.
pub trait Emitter {
    fn emit(&self, event: Event);
}

// =============================================================================
// Event Bus
// =============================================================================

/// Handle returned by every registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&Event)>;

enum Matcher {
    Exact(String),
    Predicate(Rc<dyn Fn(&str) -> bool>),
    All,
}

impl Matcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(key) => key == name,
            Matcher::Predicate(predicate) => predicate(name),
            Matcher::All => true,
        }
    }
}

struct Subscription {
    id: SubscriptionId,
    matcher: Matcher,
    handler: Handler,
}

/// Synchronous in-process fan-out.
///
/// Single-threaded by construction (`Rc` handlers); there is no delivery
/// guarantee beyond "every matching subscriber present at delivery time".
#[derive(Default)]
pub struct EventBus {
    subscriptions: RefCell<Vec<Subscription>>,
    queue: RefCell<VecDeque<Event>>,
    depth: Cell<usize>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to one exact event name.
    pub fn on<F>(&self, name: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + 'static,
    {
        self.register(Matcher::Exact(name.to_string()), Rc::new(handler))
    }

    /// Subscribes to every event whose name satisfies `predicate`.
    pub fn on_match<P, F>(&self, predicate: P, handler: F) -> SubscriptionId
    where
        P: Fn(&str) -> bool + 'static,
        F: Fn(&Event) + 'static,
    {
        self.register(Matcher::Predicate(Rc::new(predicate)), Rc::new(handler))
    }

    /// Subscribes to every event.
    pub fn on_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + 'static,
    {
        self.register(Matcher::All, Rc::new(handler))
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Publishes an event.
    ///
    /// Delivered immediately unless a delivery or a [`hold`](Self::hold) is
    /// already in progress, in which case it is queued behind it.
    pub fn emit(&self, event: Event) {
        self.hold(|| self.queue.borrow_mut().push_back(event));
    }

    /// Runs `f` with delivery deferred, then delivers whatever it emitted.
    ///
    /// Use this around any mutation made while holding a borrow that the
    /// reacting handlers will need.
    pub fn hold<R>(&self, f: impl FnOnce() -> R) -> R {
        let result = {
            let _guard = DepthGuard::enter(&self.depth);
            f()
        };
        if self.depth.get() == 0 {
            self.flush();
        }
        result
    }

    fn register(&self, matcher: Matcher, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            matcher,
            handler,
        });
        id
    }

    fn flush(&self) {
        let _guard = DepthGuard::enter(&self.depth);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            self.dispatch(&event);
        }
    }

    fn dispatch(&self, event: &Event) {
        let name = event.name();
        // Snapshot so handlers may subscribe or unsubscribe while running
        let handlers: Vec<Handler> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.matcher.matches(&name))
            .map(|s| s.handler.clone())
            .collect();

        trace!(event = %name, handlers = handlers.len(), "Dispatching event");

        for handler in handlers {
            handler(event);
        }
    }
}

impl Emitter for EventBus {
    fn emit(&self, event: Event) {
        EventBus::emit(self, event);
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.borrow().len())
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

/// Increments the delivery depth for its lifetime, also on unwind.
struct DepthGuard<'a>(&'a Cell<usize>);

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        DepthGuard(depth)
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(bus: &EventBus) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.on_all(move |event| sink.borrow_mut().push(event.name().into_owned()));
        seen
    }

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BasketChanged(None).name(), "basket:change");
        assert_eq!(
            Event::FormSubmitted {
                form: "contacts".to_string()
            }
            .name(),
            "contacts:submit"
        );
        assert_eq!(
            Event::FieldChanged {
                form: "order".to_string(),
                field: "address".to_string(),
                value: "x".to_string(),
            }
            .name(),
            "order.address:change"
        );
    }

    #[test]
    fn test_exact_subscription_only_sees_its_name() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        bus.on(names::MODAL_OPEN, move |_| counter.set(counter.get() + 1));

        bus.emit(Event::ModalOpened);
        bus.emit(Event::ModalClosed);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_predicate_subscription() {
        let bus = EventBus::new();
        let fields = Rc::new(RefCell::new(Vec::new()));
        let sink = fields.clone();
        bus.on_match(field_change_of("contacts"), move |event| {
            if let Event::FieldChanged { field, .. } = event {
                sink.borrow_mut().push(field.clone());
            }
        });

        for (form, field) in [("contacts", "email"), ("order", "address"), ("contacts", "phone")] {
            bus.emit(Event::FieldChanged {
                form: form.to_string(),
                field: field.to_string(),
                value: String::new(),
            });
        }

        assert_eq!(*fields.borrow(), vec!["email", "phone"]);
    }

    #[test]
    fn test_field_change_predicate() {
        let matches = field_change_of("order");
        assert!(matches("order.address:change"));
        assert!(matches("order.payment:change"));
        assert!(!matches("order:submit"));
        assert!(!matches("order.:change"));
        assert!(!matches("contacts.email:change"));
        assert!(!matches("order.a:b:change"));
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let a = order.clone();
        bus.on(names::BASKET_OPEN, move |_| a.borrow_mut().push("exact"));
        let b = order.clone();
        bus.on_match(|name| name.starts_with("basket"), move |_| b.borrow_mut().push("pattern"));
        let c = order.clone();
        bus.on_all(move |_| c.borrow_mut().push("all"));

        bus.emit(Event::BasketOpened);
        assert_eq!(*order.borrow(), vec!["exact", "pattern", "all"]);
    }

    #[test]
    fn test_nested_emit_runs_to_completion() {
        let bus = Rc::new(EventBus::new());
        let seen = recorder(&bus);

        let inner = bus.clone();
        bus.on(names::CARD_SELECT, move |_| inner.emit(Event::ModalOpened));

        bus.emit(Event::CardSelected(crate::Product::new("1", "a", None)));
        bus.emit(Event::BasketOpened);

        assert_eq!(
            *seen.borrow(),
            vec!["card:select", "modal:open", "basket:open"]
        );
    }

    #[test]
    fn test_nested_emit_waits_for_remaining_subscribers() {
        let bus = Rc::new(EventBus::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner = bus.clone();
        let first = order.clone();
        bus.on(names::CARD_SELECT, move |_| {
            first.borrow_mut().push("card:first");
            inner.emit(Event::ModalOpened);
        });
        let second = order.clone();
        bus.on(names::CARD_SELECT, move |_| second.borrow_mut().push("card:second"));
        let modal = order.clone();
        bus.on(names::MODAL_OPEN, move |_| modal.borrow_mut().push("modal"));

        bus.emit(Event::CardSelected(crate::Product::new("1", "a", None)));

        // The modal handler sees a card:select that every subscriber has finished
        assert_eq!(*order.borrow(), vec!["card:first", "card:second", "modal"]);
    }

    #[test]
    fn test_hold_defers_delivery() {
        let bus = EventBus::new();
        let seen = recorder(&bus);

        bus.hold(|| {
            bus.emit(Event::ModalOpened);
            assert!(seen.borrow().is_empty());
        });
        assert_eq!(*seen.borrow(), vec!["modal:open"]);
    }

    #[test]
    fn test_off_removes_subscription() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = bus.on_all(move |_| counter.set(counter.get() + 1));

        bus.emit(Event::ModalOpened);
        assert!(bus.off(id));
        assert!(!bus.off(id));
        bus.emit(Event::ModalOpened);

        assert_eq!(hits.get(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
