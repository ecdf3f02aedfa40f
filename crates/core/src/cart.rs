//! Session cart: an ordered list of line items with derived totals.
//!
//! Lines are merged by identity (product name plus the exact ordered list of
//! customizations). Index-based quantity controls mirror the buttons in the
//! cart panel; an index that does not point at a line is ignored.

use serde::{Deserialize, Serialize};

use crate::Price;

/// Flat delivery fee charged on every non-empty cart.
pub const DELIVERY_FEE: Price = Price::from_cents(250);

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name as displayed.
    pub name: String,
    /// Price of a single unit.
    pub unit_price: Price,
    /// Display asset reference. Not validated.
    pub image: String,
    /// Chosen options, in the order they were chosen.
    pub customizations: Vec<String>,
    /// Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Whether an addition of `name` with `customizations` merges into this line.
    #[must_use]
    pub fn is_same_as(&self, name: &str, customizations: &[String]) -> bool {
        self.name == name && self.customizations.as_slice() == customizations
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Totals derived from the cart contents. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

/// Result of a quantity control applied to a line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// Quantity changed; the line is still present.
    Quantity(u32),
    /// The line was removed.
    Removed,
    /// The index did not match a line.
    Ignored,
}

/// The cart of one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    #[serde(default)]
    panel_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// If a line with the same name and customizations exists its quantity
    /// goes up by one; otherwise a new line with quantity 1 is appended.
    /// Adding always opens the cart panel.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        unit_price: Price,
        image: impl Into<String>,
        customizations: Vec<String>,
    ) {
        let name = name.into();
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.is_same_as(&name, &customizations))
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                name,
                unit_price,
                image: image.into(),
                customizations,
                quantity: 1,
            });
        }
        self.panel_open = true;
    }

    /// Increase the quantity of the line at `index` by one.
    pub fn increment(&mut self, index: usize) -> LineChange {
        match self.items.get_mut(index) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                LineChange::Quantity(line.quantity)
            }
            None => LineChange::Ignored,
        }
    }

    /// Decrease the quantity of the line at `index`, removing it at 1.
    pub fn decrement(&mut self, index: usize) -> LineChange {
        let Some(line) = self.items.get_mut(index) else {
            return LineChange::Ignored;
        };

        if line.quantity > 1 {
            line.quantity -= 1;
            LineChange::Quantity(line.quantity)
        } else {
            self.items.remove(index);
            LineChange::Removed
        }
    }

    /// Remove the line at `index` regardless of quantity.
    pub fn remove(&mut self, index: usize) -> LineChange {
        if index < self.items.len() {
            self.items.remove(index);
            LineChange::Removed
        } else {
            LineChange::Ignored
        }
    }

    /// Derive item count, subtotal, delivery fee and total.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        if self.items.is_empty() {
            return CartTotals {
                item_count: 0,
                subtotal: Price::ZERO,
                delivery_fee: Price::ZERO,
                total: Price::ZERO,
            };
        }

        let subtotal: Price = self.items.iter().map(LineItem::line_total).sum();
        CartTotals {
            item_count: self.item_count(),
            subtotal,
            delivery_fee: DELIVERY_FEE,
            total: subtotal + DELIVERY_FEE,
        }
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// The lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the side panel is showing.
    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }
}
