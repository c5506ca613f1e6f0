//! # Checkout Forms
//!
//! A generic [`Form`] publishes input and submit events under its name; the
//! two checkout steps wrap it with their own input values.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input("address", "x")  ──►  order.address:change  {field, value}      │
//! │  submit()               ──►  order:submit          (only when valid)   │
//! │                                                                         │
//! │  render(patch, state)   ◄──  orchestrator, after formErrors*:change    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::rc::Rc;

use larek_core::{
    ContactsField, ContactsForm, ContactsFormPatch, DeliveryForm, DeliveryFormPatch, Emitter,
    Event, OrderField, PaymentMethod, CONTACTS_FORM, ORDER_FORM,
};
use tracing::debug;

/// Validity and error line shared by every form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub valid: bool,
    pub errors: String,
}

impl FormState {
    /// A freshly opened, not yet valid form.
    pub fn pristine() -> Self {
        Self::default()
    }
}

pub struct Form {
    name: String,
    state: FormState,
    events: Rc<dyn Emitter>,
}

impl Form {
    pub fn new(name: impl Into<String>, events: Rc<dyn Emitter>) -> Self {
        Form {
            name: name.into(),
            state: FormState::pristine(),
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emits `{name}.{field}:change` with the new value.
    pub fn input(&self, field: &str, value: &str) {
        self.events.emit(Event::FieldChanged {
            form: self.name.clone(),
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    /// Emits `{name}:submit`. The submit button is disabled while the form
    /// is invalid, so nothing happens then.
    pub fn submit(&self) {
        if !self.state.valid {
            debug!(form = %self.name, "Submit ignored: form is invalid");
            return;
        }
        self.events.emit(Event::FormSubmitted {
            form: self.name.clone(),
        });
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.state.valid = valid;
    }

    pub fn set_errors(&mut self, errors: impl Into<String>) {
        self.state.errors = errors.into();
    }

    pub fn render_state(&mut self, state: FormState) {
        self.state = state;
    }

    pub fn is_valid(&self) -> bool {
        self.state.valid
    }

    pub fn errors(&self) -> &str {
        &self.state.errors
    }
}

// =============================================================================
// Delivery Step
// =============================================================================

/// Payment selector plus delivery address.
pub struct OrderFormView {
    form: Form,
    fields: DeliveryForm,
}

impl OrderFormView {
    pub fn new(events: Rc<dyn Emitter>) -> Self {
        OrderFormView {
            form: Form::new(ORDER_FORM, events),
            fields: DeliveryForm::default(),
        }
    }

    /// Merges the patch into the inputs and replaces the form state.
    pub fn render(&mut self, patch: DeliveryFormPatch, state: FormState) {
        patch.apply_to(&mut self.fields);
        self.form.render_state(state);
    }

    /// Payment button click: highlights it and reports the change.
    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.fields.payment = method;
        self.form.input(OrderField::Payment.as_str(), method.as_str());
    }

    pub fn input_address(&mut self, value: &str) {
        self.fields.address = value.to_string();
        self.form.input(OrderField::Address.as_str(), value);
    }

    pub fn submit(&self) {
        self.form.submit();
    }

    pub fn fields(&self) -> &DeliveryForm {
        &self.fields
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}

// =============================================================================
// Contact Step
// =============================================================================

/// Email and phone inputs.
pub struct ContactsFormView {
    form: Form,
    fields: ContactsForm,
}

impl ContactsFormView {
    pub fn new(events: Rc<dyn Emitter>) -> Self {
        ContactsFormView {
            form: Form::new(CONTACTS_FORM, events),
            fields: ContactsForm::default(),
        }
    }

    pub fn render(&mut self, patch: ContactsFormPatch, state: FormState) {
        patch.apply_to(&mut self.fields);
        self.form.render_state(state);
    }

    pub fn input(&mut self, field: ContactsField, value: &str) {
        match field {
            ContactsField::Email => self.fields.email = value.to_string(),
            ContactsField::Phone => self.fields.phone = value.to_string(),
        }
        self.form.input(field.as_str(), value);
    }

    pub fn submit(&self) {
        self.form.submit();
    }

    pub fn fields(&self) -> &ContactsForm {
        &self.fields
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}
