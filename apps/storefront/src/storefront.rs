//! # Storefront Orchestration
//!
//! Composition root: owns the bus, the state container, the views and the
//! API client, and wires them together with bus subscriptions.
//!
//! ## Event Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View action                 Event                  Reaction            │
//! │  ───────────                 ─────                  ────────            │
//! │  catalog card click     ──►  card:select       ──►  AppData::set_preview│
//! │                              preview:change    ──►  preview card, modal │
//! │  preview button         ──►  (add/remove)      ──►  basket:change       │
//! │                              basket:change     ──►  counter, rows, total│
//! │  header basket icon     ──►  basket:open       ──►  modal(basket)       │
//! │  "Оформить"             ──►  order:open        ──►  modal(order form)   │
//! │  order.{field}:change   ──►  set_order_field   ──►  formErrorsOrder     │
//! │  order:submit           ──►                    ──►  modal(contacts)     │
//! │  contacts.{field}:change──►  set_contacts_field──►  formErrorsContacts  │
//! │  contacts:submit        ──►  spawn_local(POST /order)                   │
//! │                                 ok  ──► clear basket, modal(success)    │
//! │                                 err ──► error! log, UI unchanged        │
//! │  modal:open / close     ──►  page lock / unlock                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Borrow Discipline
//! State and views live in `RefCell`s shared with the handlers. Every
//! mutation that emits runs inside [`EventBus::hold`], so the borrow is
//! released before any handler sees the event.
//!
//! ## Runtime
//! Network work is spawned with `tokio::task::spawn_local`; the storefront
//! must be driven from inside a `tokio::task::LocalSet`.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use larek_api::StoreApi;
use larek_core::events::{field_change_of, names};
use larek_core::validation::join_errors;
use larek_core::{
    AppData, ContactsField, ContactsFormPatch, DeliveryFormPatch, Emitter, Event, EventBus,
    OrderField, OrderResult, PaymentMethod, Product, CONTACTS_FORM, ORDER_FORM,
};
use tracing::{debug, error, info, warn};

use crate::error::{StorefrontError, StorefrontResult};
use crate::views::{
    BasketView, Card, CardAction, CardLayout, ContactsFormView, FormState, Modal, ModalContent,
    OrderFormView, Page, Success, ADD_LABEL, REMOVE_LABEL,
};

/// The running storefront.
pub struct Storefront {
    shared: Rc<Shared>,
}

struct Shared {
    bus: Rc<EventBus>,
    state: RefCell<AppData>,
    api: Rc<dyn StoreApi>,
    page: RefCell<Page>,
    modal: RefCell<Modal>,
    basket: RefCell<BasketView>,
    order_form: RefCell<OrderFormView>,
    contacts_form: RefCell<ContactsFormView>,
    submitting: Cell<bool>,
}

impl Storefront {
    /// Builds every component and registers all subscriptions.
    pub fn new(api: Rc<dyn StoreApi>) -> Self {
        let bus = Rc::new(EventBus::new());
        let events: Rc<dyn Emitter> = bus.clone();

        let shared = Rc::new(Shared {
            state: RefCell::new(AppData::new(events.clone())),
            page: RefCell::new(Page::new(events.clone())),
            modal: RefCell::new(Modal::new(events.clone())),
            basket: RefCell::new(BasketView::new(events.clone())),
            order_form: RefCell::new(OrderFormView::new(events.clone())),
            contacts_form: RefCell::new(ContactsFormView::new(events)),
            bus,
            api,
            submitting: Cell::new(false),
        });
        Shared::subscribe(&shared);

        debug!(
            subscriptions = shared.bus.subscriber_count(),
            "Storefront wired"
        );
        Storefront { shared }
    }

    // =========================================================================
    // Network
    // =========================================================================

    /// Loads the catalog in the background. Failures are logged only.
    pub fn start(&self) {
        let shared = self.shared.clone();
        tokio::task::spawn_local(async move {
            if let Err(err) = shared.load_catalog().await {
                error!(code = err.code(), %err, "Catalog load failed");
            }
        });
    }

    /// Fetches the catalog and replaces the state's items with it.
    pub async fn load_catalog(&self) -> StorefrontResult<usize> {
        self.shared.load_catalog().await
    }

    /// Submits the current order, exactly like the contacts form does.
    ///
    /// ## Errors
    /// - `SubmitInProgress` while another submission is running
    /// - `OrderIncomplete` if the delivery step does not validate
    /// - `Api` if the server rejects the order or cannot be reached
    pub async fn submit_order(&self) -> StorefrontResult<OrderResult> {
        if !self.shared.try_begin_submit() {
            return Err(StorefrontError::SubmitInProgress);
        }
        self.shared.send_order().await
    }

    pub fn is_submitting(&self) -> bool {
        self.shared.submitting.get()
    }

    // =========================================================================
    // User Actions
    // =========================================================================

    /// Clicks the catalog card at `index`.
    pub fn select_card(&self, index: usize) {
        let action = self.shared.page.borrow().catalog().get(index).and_then(Card::action);
        run(action);
    }

    /// Clicks the add/remove button of the previewed card.
    pub fn click_preview_button(&self) {
        let action = match self.shared.modal.borrow().content() {
            Some(ModalContent::Preview(card)) => card.action(),
            _ => None,
        };
        run(action);
    }

    /// Clicks the header basket icon.
    pub fn open_basket(&self) {
        self.shared.bus.hold(|| self.shared.page.borrow().open_basket());
    }

    /// Clicks the delete button of the basket row at `index`.
    pub fn remove_basket_row(&self, index: usize) {
        let action = self.shared.basket.borrow().items().get(index).and_then(Card::action);
        run(action);
    }

    /// Clicks "Оформить" in the basket.
    pub fn checkout(&self) {
        self.shared.bus.hold(|| self.shared.basket.borrow().checkout());
    }

    pub fn select_payment(&self, method: PaymentMethod) {
        self.shared
            .bus
            .hold(|| self.shared.order_form.borrow_mut().select_payment(method));
    }

    pub fn input_address(&self, value: &str) {
        self.shared
            .bus
            .hold(|| self.shared.order_form.borrow_mut().input_address(value));
    }

    pub fn submit_delivery(&self) {
        self.shared.bus.hold(|| self.shared.order_form.borrow().submit());
    }

    pub fn input_contact(&self, field: ContactsField, value: &str) {
        self.shared
            .bus
            .hold(|| self.shared.contacts_form.borrow_mut().input(field, value));
    }

    pub fn submit_contacts(&self) {
        self.shared.bus.hold(|| self.shared.contacts_form.borrow().submit());
    }

    /// Clicks the modal's close cross.
    pub fn close_modal(&self) {
        self.shared.close_modal();
    }

    /// Clicks "За новыми покупками!" on the success message.
    pub fn close_success(&self) {
        let action = match self.shared.modal.borrow().content() {
            Some(ModalContent::Success(success)) => Some(success.close_action()),
            _ => None,
        };
        run(action);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.shared.bus
    }

    pub fn state(&self) -> Ref<'_, AppData> {
        self.shared.state.borrow()
    }

    pub fn page(&self) -> Ref<'_, Page> {
        self.shared.page.borrow()
    }

    pub fn modal(&self) -> Ref<'_, Modal> {
        self.shared.modal.borrow()
    }

    pub fn basket(&self) -> Ref<'_, BasketView> {
        self.shared.basket.borrow()
    }

    pub fn order_form(&self) -> Ref<'_, OrderFormView> {
        self.shared.order_form.borrow()
    }

    pub fn contacts_form(&self) -> Ref<'_, ContactsFormView> {
        self.shared.contacts_form.borrow()
    }
}

fn run(action: Option<CardAction>) {
    if let Some(action) = action {
        action();
    }
}

/// Adapts a `Shared` method into a bus handler holding only a weak link.
fn bind<F>(shared: &Rc<Shared>, handler: F) -> impl Fn(&Event) + 'static
where
    F: Fn(&Rc<Shared>, &Event) + 'static,
{
    let weak: Weak<Shared> = Rc::downgrade(shared);
    move |event: &Event| {
        if let Some(shared) = weak.upgrade() {
            handler(&shared, event);
        }
    }
}

impl Shared {
    // =========================================================================
    // Subscriptions
    // =========================================================================

    fn subscribe(shared: &Rc<Shared>) {
        let bus = &shared.bus;

        bus.on_all(|event| debug!(event = %event.name(), payload = ?event, "Event"));

        bus.on(
            names::MODAL_OPEN,
            bind(shared, |s, _| s.page.borrow_mut().set_locked(true)),
        );
        bus.on(
            names::MODAL_CLOSE,
            bind(shared, |s, _| s.page.borrow_mut().set_locked(false)),
        );
        bus.on(names::CARD_SELECT, bind(shared, |s, e| s.on_card_select(e)));
        bus.on(names::ITEMS_CHANGE, bind(shared, |s, e| s.render_catalog(e)));
        bus.on(names::PREVIEW_CHANGE, bind(shared, |s, e| s.render_preview(e)));
        bus.on(names::BASKET_CHANGE, bind(shared, |s, _| s.render_basket()));
        bus.on(names::BASKET_OPEN, bind(shared, |s, _| s.show_basket()));
        bus.on(names::ORDER_OPEN, bind(shared, |s, _| s.show_order_form()));
        bus.on_match(
            field_change_of(ORDER_FORM),
            bind(shared, |s, e| s.on_order_field(e)),
        );
        bus.on(
            names::ORDER_ERRORS_CHANGE,
            bind(shared, |s, e| s.render_order_errors(e)),
        );
        bus.on_match(
            field_change_of(CONTACTS_FORM),
            bind(shared, |s, e| s.on_contacts_field(e)),
        );
        bus.on(
            names::CONTACTS_ERRORS_CHANGE,
            bind(shared, |s, e| s.render_contacts_errors(e)),
        );
        bus.on(names::ORDER_SUBMIT, bind(shared, |s, _| s.show_contacts_form()));
        bus.on(names::CONTACTS_SUBMIT, bind(shared, |s, _| s.on_contacts_submit()));
    }

    /// Mutates the state with event delivery deferred until the borrow ends.
    fn update<R>(&self, f: impl FnOnce(&mut AppData) -> R) -> R {
        self.bus.hold(|| f(&mut self.state.borrow_mut()))
    }

    fn emit_action(&self, event: Event) -> CardAction {
        let bus = self.bus.clone();
        Rc::new(move || bus.emit(event.clone()))
    }

    fn close_modal(&self) {
        self.bus.hold(|| self.modal.borrow_mut().close());
    }

    // =========================================================================
    // Catalog + Preview
    // =========================================================================

    fn on_card_select(&self, event: &Event) {
        if let Event::CardSelected(product) = event {
            self.update(|state| state.set_preview(Some(product.clone())));
        }
    }

    fn render_catalog(&self, event: &Event) {
        let Event::ItemsChanged(items) = event else { return };
        let cards = items
            .iter()
            .map(|item| {
                let mut card = Card::new(
                    CardLayout::Catalog,
                    Some(self.emit_action(Event::CardSelected(item.clone()))),
                );
                card.render(item);
                card
            })
            .collect();
        self.page.borrow_mut().set_catalog(cards);
    }

    fn render_preview(self: &Rc<Self>, event: &Event) {
        let Event::PreviewChanged(Some(item)) = event else { return };

        let weak = Rc::downgrade(self);
        let product = item.clone();
        let toggle: CardAction = Rc::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.toggle_basket(&product);
            }
        });

        let mut card = Card::new(CardLayout::Preview, Some(toggle));
        card.render(item);
        card.set_button(self.button_label(item));

        let mut modal = self.modal.borrow_mut();
        modal.render(ModalContent::Preview(card));
        modal.open();
    }

    fn button_label(&self, item: &Product) -> &'static str {
        if self.state.borrow().in_basket(item) {
            REMOVE_LABEL
        } else {
            ADD_LABEL
        }
    }

    /// Preview button: adds the product if absent, removes it otherwise,
    /// then relabels the button.
    fn toggle_basket(&self, item: &Product) {
        let label = self.update(|state| {
            if state.in_basket(item) {
                state.remove_from_basket(item);
                ADD_LABEL
            } else {
                state.add_to_basket(item);
                REMOVE_LABEL
            }
        });

        if let Some(ModalContent::Preview(card)) = self.modal.borrow_mut().content_mut() {
            if card.id() == item.id {
                card.set_button(label);
            }
        }
    }

    // =========================================================================
    // Basket
    // =========================================================================

    /// Re-reads the basket from state; the event payload is ignored.
    fn render_basket(self: &Rc<Self>) {
        let state = self.state.borrow();
        let basket = state.basket();
        self.page.borrow_mut().set_counter(basket.len());

        let products = match state.basket_products() {
            Ok(products) => products,
            Err(err) => {
                error!(%err, "Basket is out of sync with the catalog");
                return;
            }
        };

        let rows = products
            .into_iter()
            .map(|product| {
                let weak = Rc::downgrade(self);
                let target = product.clone();
                let remove: CardAction = Rc::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.update(|state| state.remove_from_basket(&target));
                    }
                });
                let mut card = Card::new(CardLayout::Basket, Some(remove));
                card.render(&product);
                card
            })
            .collect();

        let mut view = self.basket.borrow_mut();
        view.set_items(rows);
        view.set_total(basket.total);
    }

    fn show_basket(&self) {
        let mut modal = self.modal.borrow_mut();
        modal.render(ModalContent::Basket);
        modal.open();
    }

    // =========================================================================
    // Delivery Step
    // =========================================================================

    fn show_order_form(&self) {
        self.order_form.borrow_mut().render(
            DeliveryFormPatch {
                payment: Some(PaymentMethod::Card),
                address: Some(String::new()),
            },
            FormState::pristine(),
        );

        let mut modal = self.modal.borrow_mut();
        modal.render(ModalContent::OrderForm);
        modal.open();
    }

    fn on_order_field(&self, event: &Event) {
        let Event::FieldChanged { field, value, .. } = event else { return };
        let result = field
            .parse::<OrderField>()
            .and_then(|field| self.update(|state| state.set_order_field(field, value)));
        if let Err(err) = result {
            warn!(%err, "Delivery input rejected");
        }
    }

    fn render_order_errors(&self, event: &Event) {
        let Event::OrderErrorsChanged(errors) = event else { return };
        let mut view = self.order_form.borrow_mut();
        let form = view.form_mut();
        form.set_valid(errors.is_empty());
        form.set_errors(join_errors(errors.values()));
    }

    // =========================================================================
    // Contact Step
    // =========================================================================

    fn show_contacts_form(&self) {
        self.contacts_form.borrow_mut().render(
            ContactsFormPatch {
                email: Some(String::new()),
                phone: Some(String::new()),
            },
            FormState::pristine(),
        );
        self.modal.borrow_mut().render(ModalContent::ContactsForm);
    }

    fn on_contacts_field(&self, event: &Event) {
        let Event::FieldChanged { field, value, .. } = event else { return };
        match field.parse::<ContactsField>() {
            Ok(field) => self.update(|state| state.set_contacts_field(field, value)),
            Err(err) => warn!(%err, "Contact input rejected"),
        }
    }

    fn render_contacts_errors(&self, event: &Event) {
        let Event::ContactsErrorsChanged(errors) = event else { return };
        let mut view = self.contacts_form.borrow_mut();
        let form = view.form_mut();
        form.set_valid(errors.is_empty());
        form.set_errors(join_errors(errors.values()));
    }

    fn on_contacts_submit(self: &Rc<Self>) {
        if !self.try_begin_submit() {
            warn!("Order submission already in progress, ignoring submit");
            return;
        }

        let shared = self.clone();
        tokio::task::spawn_local(async move {
            if let Err(err) = shared.send_order().await {
                error!(code = err.code(), %err, "Order submission failed");
            }
        });
    }

    // =========================================================================
    // Network Tasks
    // =========================================================================

    async fn load_catalog(&self) -> StorefrontResult<usize> {
        let items = self.api.get_product_list().await?;
        let count = items.len();
        self.update(|state| state.set_items(items));
        info!(count, "Catalog loaded");
        Ok(count)
    }

    fn try_begin_submit(&self) -> bool {
        !self.submitting.replace(true)
    }

    /// Runs one submission and releases the in-flight guard afterwards.
    async fn send_order(self: &Rc<Self>) -> StorefrontResult<OrderResult> {
        let result = self.place_order().await;
        self.submitting.set(false);
        result
    }

    async fn place_order(self: &Rc<Self>) -> StorefrontResult<OrderResult> {
        let order = self.update(|state| state.finalize_order().then(|| state.order().clone()));
        let Some(order) = order else {
            let errors = join_errors(self.state.borrow().order_errors().values());
            return Err(StorefrontError::OrderIncomplete(errors));
        };

        info!(
            items = order.items.len(),
            total = order.total.units(),
            payment = %order.payment,
            "Submitting order"
        );
        let result = self.api.order_products(&order).await?;

        self.update(|state| state.clear_basket());

        let weak = Rc::downgrade(self);
        let success = Success::new(
            order.total,
            Rc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.close_modal();
                }
            }),
        );
        self.bus.hold(|| {
            let mut modal = self.modal.borrow_mut();
            modal.render(ModalContent::Success(success));
            modal.open();
        });

        Ok(result)
    }
}
