//! # Product Card
//!
//! One product rendered in one of three layouts: the catalog tile, the
//! preview shown in the modal, or a basket row.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ [софт-скил] card__category_soft
//! │  +1 час в сутках             │
//! │  <image>                     │
//! │  description (preview only)  │
//! │  750 синапсов   [В корзину]  │
//! └──────────────────────────────┘
//! ```

use std::fmt;
use std::rc::Rc;

use larek_core::{Money, Product};

/// Button label while the product is not in the basket.
pub const ADD_LABEL: &str = "В корзину";

/// Button label while the product is in the basket.
pub const REMOVE_LABEL: &str = "Удалить из корзины";

const CATEGORY_CLASS: &str = "card__category";

/// Maps a catalog category to its style modifier.
pub fn category_modifier(category: &str) -> Option<&'static str> {
    match category {
        "софт-скил" => Some("soft"),
        "хард-скил" => Some("hard"),
        "кнопка" => Some("button"),
        "другое" => Some("other"),
        "дополнительное" => Some("additional"),
        _ => None,
    }
}

/// Layout a card is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    Catalog,
    Preview,
    Basket,
}

/// Callback run when the card (or its button) is clicked.
pub type CardAction = Rc<dyn Fn()>;

/// A rendered product card.
pub struct Card {
    layout: CardLayout,
    id: String,
    title: String,
    image: String,
    description: String,
    category: String,
    category_class: String,
    price: String,
    button: String,
    button_disabled: bool,
    index: Option<usize>,
    action: Option<CardAction>,
}

impl Card {
    pub fn new(layout: CardLayout, action: Option<CardAction>) -> Self {
        Card {
            layout,
            id: String::new(),
            title: String::new(),
            image: String::new(),
            description: String::new(),
            category: String::new(),
            category_class: CATEGORY_CLASS.to_string(),
            price: String::new(),
            button: String::new(),
            button_disabled: false,
            index: None,
            action,
        }
    }

    /// Fills every field from `product`.
    ///
    /// A product without a price is shown as priceless and its button is
    /// disabled; on a preview card that keeps it out of the basket.
    pub fn render(&mut self, product: &Product) -> &mut Self {
        self.id = product.id.clone();
        self.title = product.title.clone();
        self.image = product.image.clone();
        self.description = product.description.clone();
        self.set_category(&product.category);
        self.set_price(product.price);
        self
    }

    fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.category_class = match category_modifier(category) {
            Some(modifier) => format!("{}_{}", CATEGORY_CLASS, modifier),
            None => CATEGORY_CLASS.to_string(),
        };
    }

    fn set_price(&mut self, price: Option<Money>) {
        self.price = Money::label(price);
        self.button_disabled = price.is_none();
    }

    pub fn set_button(&mut self, label: &str) {
        self.button = label.to_string();
    }

    /// Position shown in basket rows, counted from 1.
    pub fn set_index(&mut self, index: usize) {
        self.index = Some(index);
    }

    /// The click callback, if the card is clickable right now.
    ///
    /// Only the preview's add/remove button is ever disabled; catalog tiles
    /// and basket rows stay clickable whatever the price.
    ///
    /// Callers take the action out before invoking it, so no borrow of the
    /// card is held while the action re-renders views.
    pub fn action(&self) -> Option<CardAction> {
        if self.layout == CardLayout::Preview && self.button_disabled {
            return None;
        }
        self.action.clone()
    }

    /// Runs the click callback unless the button is disabled.
    pub fn click(&self) {
        if let Some(action) = self.action() {
            action();
        }
    }

    // =========================================================================
    // Rendered Fields
    // =========================================================================

    pub fn layout(&self) -> CardLayout {
        self.layout
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn category_class(&self) -> &str {
        &self.category_class
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn button(&self) -> &str {
        &self.button
    }

    pub fn is_button_disabled(&self) -> bool {
        self.button_disabled
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("layout", &self.layout)
            .field("id", &self.id)
            .field("title", &self.title)
            .field("price", &self.price)
            .field("button", &self.button)
            .field("button_disabled", &self.button_disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_card(layout: CardLayout) -> (Card, Rc<Cell<usize>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let card = Card::new(
            layout,
            Some(Rc::new(move || counter.set(counter.get() + 1))),
        );
        (card, clicks)
    }

    #[test]
    fn test_render_priced_product() {
        let (mut card, clicks) = counting_card(CardLayout::Preview);
        let product = Product {
            category: "хард-скил".to_string(),
            description: "Тестовое описание".to_string(),
            ..Product::new("1", "Фреймворк куки судьбы", Some(Money::from_units(2500)))
        };

        card.render(&product);
        card.click();

        assert_eq!(card.title(), "Фреймворк куки судьбы");
        assert_eq!(card.price(), "2500 синапсов");
        assert_eq!(card.category_class(), "card__category_hard");
        assert!(!card.is_button_disabled());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_priceless_product_disables_button() {
        let (mut card, clicks) = counting_card(CardLayout::Preview);

        card.render(&Product::new("2", "Мамка-таймер", None));
        card.click();

        assert_eq!(card.price(), "Бесценно");
        assert!(card.is_button_disabled());
        assert!(card.action().is_none());
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_category_modifiers() {
        assert_eq!(category_modifier("софт-скил"), Some("soft"));
        assert_eq!(category_modifier("кнопка"), Some("button"));
        assert_eq!(category_modifier("дополнительное"), Some("additional"));
        assert_eq!(category_modifier("неизвестное"), None);

        let mut card = Card::new(CardLayout::Catalog, None);
        card.render(&Product {
            category: "неизвестное".to_string(),
            ..Product::new("3", "x", None)
        });
        assert_eq!(card.category_class(), "card__category");
    }

    #[test]
    fn test_priceless_catalog_tile_stays_clickable() {
        let (mut card, clicks) = counting_card(CardLayout::Catalog);

        card.render(&Product::new("2", "Мамка-таймер", None));
        card.click();

        assert_eq!(card.price(), "Бесценно");
        assert!(card.action().is_some());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_card_without_action_ignores_clicks() {
        let mut card = Card::new(CardLayout::Catalog, None);
        card.render(&Product::new("4", "x", Some(Money::from_units(1))));
        card.click();
        assert!(card.action().is_none());
    }
}
