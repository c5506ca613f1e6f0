//! # Modal
//!
//! A single overlay whose body is swapped between the preview card, the
//! basket, the two checkout forms and the success message.

use std::rc::Rc;

use larek_core::{Emitter, Event};

use super::card::Card;
use super::success::Success;

/// What the modal is currently showing.
///
/// The basket and the forms are long-lived views owned elsewhere, so only a
/// marker is stored for them.
#[derive(Debug)]
pub enum ModalContent {
    Preview(Card),
    Basket,
    OrderForm,
    ContactsForm,
    Success(Success),
}

pub struct Modal {
    content: Option<ModalContent>,
    open: bool,
    events: Rc<dyn Emitter>,
}

impl Modal {
    pub fn new(events: Rc<dyn Emitter>) -> Self {
        Modal {
            content: None,
            open: false,
            events,
        }
    }

    /// Swaps the body without changing visibility.
    pub fn render(&mut self, content: ModalContent) {
        self.content = Some(content);
    }

    /// Shows the overlay and emits `modal:open`.
    pub fn open(&mut self) {
        self.open = true;
        self.events.emit(Event::ModalOpened);
    }

    /// Hides the overlay, drops its body and emits `modal:close`.
    pub fn close(&mut self) {
        self.open = false;
        self.content = None;
        self.events.emit(Event::ModalClosed);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut ModalContent> {
        self.content.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Event>>);

    impl Emitter for Recorder {
        fn emit(&self, event: Event) {
            self.0.borrow_mut().push(event);
        }
    }

    #[test]
    fn test_open_close_cycle() {
        let recorder = Rc::new(Recorder::default());
        let mut modal = Modal::new(recorder.clone());

        modal.render(ModalContent::Basket);
        modal.open();
        assert!(modal.is_open());
        assert!(matches!(modal.content(), Some(ModalContent::Basket)));

        modal.close();
        assert!(!modal.is_open());
        assert!(modal.content().is_none());
        assert_eq!(
            *recorder.0.borrow(),
            vec![Event::ModalOpened, Event::ModalClosed]
        );
    }

    #[test]
    fn test_render_keeps_visibility() {
        let mut modal = Modal::new(Rc::new(Recorder::default()));
        modal.render(ModalContent::OrderForm);
        assert!(!modal.is_open());
    }
}
