//! # Success Message
//!
//! Shown after the order is accepted.

use std::fmt;
use std::rc::Rc;

use larek_core::Money;

pub struct Success {
    total: Money,
    on_close: Rc<dyn Fn()>,
}

impl Success {
    pub fn new(total: Money, on_close: Rc<dyn Fn()>) -> Self {
        Success { total, on_close }
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// E.g. "Списано 750 синапсов".
    pub fn description(&self) -> String {
        format!("Списано {}", self.total)
    }

    /// "За новыми покупками!" button click.
    pub fn close(&self) {
        (self.on_close)();
    }

    /// The close callback, for callers that must release a borrow first.
    pub fn close_action(&self) -> Rc<dyn Fn()> {
        self.on_close.clone()
    }
}

impl fmt::Debug for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Success").field("total", &self.total).finish()
    }
}
