//! # Page
//!
//! The always-visible shell: header basket counter, catalog gallery and the
//! scroll lock applied while a modal is open.

use std::rc::Rc;

use larek_core::{Emitter, Event};

use super::card::Card;

pub struct Page {
    counter: usize,
    catalog: Vec<Card>,
    locked: bool,
    events: Rc<dyn Emitter>,
}

impl Page {
    pub fn new(events: Rc<dyn Emitter>) -> Self {
        Page {
            counter: 0,
            catalog: Vec::new(),
            locked: false,
            events,
        }
    }

    pub fn set_counter(&mut self, value: usize) {
        self.counter = value;
    }

    /// Replaces every card in the gallery.
    pub fn set_catalog(&mut self, cards: Vec<Card>) {
        self.catalog = cards;
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Header basket icon click.
    pub fn open_basket(&self) {
        self.events.emit(Event::BasketOpened);
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn catalog(&self) -> &[Card] {
        &self.catalog
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
