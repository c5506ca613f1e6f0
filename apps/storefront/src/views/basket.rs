//! # Basket View
//!
//! The basket modal body: numbered rows, the total, and the checkout button.

use std::rc::Rc;

use larek_core::{Emitter, Event, Money};
use tracing::debug;

use super::card::Card;

pub struct BasketView {
    items: Vec<Card>,
    total: Money,
    events: Rc<dyn Emitter>,
}

impl BasketView {
    pub fn new(events: Rc<dyn Emitter>) -> Self {
        BasketView {
            items: Vec::new(),
            total: Money::zero(),
            events,
        }
    }

    /// Replaces the rows, numbering them from 1.
    pub fn set_items(&mut self, mut items: Vec<Card>) {
        for (position, card) in items.iter_mut().enumerate() {
            card.set_index(position + 1);
        }
        self.items = items;
    }

    pub fn set_total(&mut self, total: Money) {
        self.total = total;
    }

    pub fn items(&self) -> &[Card] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Total as displayed under the rows.
    pub fn total_label(&self) -> String {
        self.total.to_string()
    }

    /// An empty basket cannot be checked out.
    pub fn is_checkout_disabled(&self) -> bool {
        self.items.is_empty()
    }

    /// "Оформить" button click. Emits `order:open` unless disabled.
    pub fn checkout(&self) {
        if self.is_checkout_disabled() {
            debug!("Checkout ignored: basket is empty");
            return;
        }
        self.events.emit(Event::OrderOpened);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::card::CardLayout;
    use larek_core::Product;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Event>>);

    impl Emitter for Recorder {
        fn emit(&self, event: Event) {
            self.0.borrow_mut().push(event);
        }
    }

    fn row(id: &str) -> Card {
        let mut card = Card::new(CardLayout::Basket, None);
        card.render(&Product::new(id, id, Some(Money::from_units(10))));
        card
    }

    #[test]
    fn test_empty_basket_blocks_checkout() {
        let recorder = Rc::new(Recorder::default());
        let basket = BasketView::new(recorder.clone());

        basket.checkout();

        assert!(basket.is_checkout_disabled());
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_rows_are_numbered_and_checkout_emits() {
        let recorder = Rc::new(Recorder::default());
        let mut basket = BasketView::new(recorder.clone());

        basket.set_items(vec![row("a"), row("b")]);
        basket.set_total(Money::from_units(20));
        basket.checkout();

        assert_eq!(basket.items()[0].index(), Some(1));
        assert_eq!(basket.items()[1].index(), Some(2));
        assert_eq!(basket.total_label(), "20 синапсов");
        assert_eq!(*recorder.0.borrow(), vec![Event::OrderOpened]);
    }
}
