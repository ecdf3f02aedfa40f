//! Step-wise pizza slice builder.
//!
//! A [`BuilderLayout`] describes the walk (which steps, which cards, the plain
//! slice price). A [`BuilderState`] holds one customer's progress and is what
//! gets stored in the session. [`Configurator`] pairs the two and exposes the
//! operations behind the builder buttons.
//!
//! Finishing the last step turns the selection into one cart line and puts
//! the builder back at step 1 with default choices.

pub mod layout;
pub mod toppings;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use layout::{
    BuilderLayout, CUSTOM_SLICE_IMAGE, CUSTOM_SLICE_NAME, Category, Choice, SizePricing, Step,
};
pub use toppings::{ToggleOutcome, Topping, ToppingSet};

use crate::Price;
use crate::cart::Cart;

/// Errors raised by builder operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// The layout has no step for this category.
    #[error("this builder does not offer a {0} choice")]
    CategoryNotOffered(&'static str),
    /// No card with this name in the category.
    #[error("unknown {category} option: {name}")]
    UnknownOption {
        category: &'static str,
        name: String,
    },
    /// No topping card with this name.
    #[error("unknown topping: {0}")]
    UnknownTopping(String),
}

/// One customer's in-progress slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderState {
    exclusive: BTreeMap<Category, Choice>,
    toppings: ToppingSet,
    current_step: u8,
}

impl BuilderState {
    /// Fresh state for `layout`: step 1, preselected categories on their first card.
    #[must_use]
    pub fn defaults(layout: &BuilderLayout) -> Self {
        let exclusive = layout
            .preselected()
            .iter()
            .filter_map(|&category| {
                layout
                    .first_choice(category)
                    .map(|choice| (category, choice.clone()))
            })
            .collect();

        Self {
            exclusive,
            toppings: ToppingSet::new(),
            current_step: 1,
        }
    }

    #[must_use]
    pub const fn current_step(&self) -> u8 {
        self.current_step
    }

    #[must_use]
    pub fn selected(&self, category: Category) -> Option<&Choice> {
        self.exclusive.get(&category)
    }

    #[must_use]
    pub const fn toppings(&self) -> &ToppingSet {
        &self.toppings
    }
}

/// A finished slice, as it went into the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSlice {
    pub price: Price,
    pub customizations: Vec<String>,
}

/// What pressing "next" did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to this step.
    Moved(u8),
    /// The slice was added to the cart and the builder reset.
    Finished(FinishedSlice),
}

/// One summary row, e.g. `("Toppings", "Olives, Onion")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

/// Builder operations over a layout and one customer's state.
#[derive(Debug, Clone)]
pub struct Configurator<'a> {
    layout: &'a BuilderLayout,
    state: BuilderState,
}

impl<'a> Configurator<'a> {
    /// Start from defaults.
    #[must_use]
    pub fn new(layout: &'a BuilderLayout) -> Self {
        Self {
            layout,
            state: BuilderState::defaults(layout),
        }
    }

    /// Pick up a state saved earlier.
    ///
    /// A step outside the layout (for instance after the layout shrank)
    /// is pulled back into range.
    #[must_use]
    pub fn resume(layout: &'a BuilderLayout, mut state: BuilderState) -> Self {
        state.current_step = state.current_step.clamp(1, layout.step_count().max(1));
        state
            .exclusive
            .retain(|&category, _| layout.offers(category));
        Self { layout, state }
    }

    #[must_use]
    pub const fn layout(&self) -> &BuilderLayout {
        self.layout
    }

    #[must_use]
    pub const fn state(&self) -> &BuilderState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> BuilderState {
        self.state
    }

    /// Make the card called `name` the active one in `category`.
    ///
    /// Price and multiplier come from the layout, never from the caller.
    ///
    /// # Errors
    ///
    /// Fails if the layout has no such category or no such card.
    pub fn select_exclusive(&mut self, category: Category, name: &str) -> Result<(), BuilderError> {
        if !self.layout.offers(category) {
            return Err(BuilderError::CategoryNotOffered(category.slug()));
        }
        let choice = self
            .layout
            .choice(category, name)
            .ok_or_else(|| BuilderError::UnknownOption {
                category: category.slug(),
                name: name.to_owned(),
            })?
            .clone();

        self.state.exclusive.insert(category, choice);
        Ok(())
    }

    /// Add or remove a topping. A fourth topping is ignored.
    ///
    /// # Errors
    ///
    /// Fails if the layout has no topping with this name.
    pub fn toggle_topping(&mut self, name: &str) -> Result<ToggleOutcome, BuilderError> {
        let topping = self
            .layout
            .topping(name)
            .ok_or_else(|| BuilderError::UnknownTopping(name.to_owned()))?
            .clone();
        Ok(self.state.toppings.toggle(topping))
    }

    /// Move forward, or finish the slice when already on the last step.
    pub fn advance_step(&mut self, cart: &mut Cart) -> Advance {
        if self.is_last_step() {
            return Advance::Finished(self.finalize(cart));
        }

        self.state.current_step += 1;
        if let Some(category) = self.current().and_then(|step| step.category()) {
            if !self.state.exclusive.contains_key(&category) {
                if let Some(first) = self.layout.first_choice(category) {
                    self.state.exclusive.insert(category, first.clone());
                }
            }
        }
        Advance::Moved(self.state.current_step)
    }

    /// Move back one step. Does nothing on step 1.
    pub fn retreat_step(&mut self) -> u8 {
        if self.state.current_step > 1 {
            self.state.current_step -= 1;
        }
        self.state.current_step
    }

    /// Running price of the slice.
    #[must_use]
    pub fn price(&self) -> Price {
        let extras: Price = self
            .state
            .exclusive
            .values()
            .map(|choice| choice.price)
            .sum::<Price>()
            + self.state.toppings.price();

        let multiplier = self
            .state
            .exclusive
            .get(&Category::Size)
            .and_then(|size| size.multiplier)
            .unwrap_or(Decimal::ONE);

        match self.layout.size_pricing() {
            SizePricing::WholeSlice => (self.layout.base_price() + extras).scaled(multiplier),
            SizePricing::ExtrasOnly => self.layout.base_price() + extras.scaled(multiplier),
        }
    }

    /// Option names in cart order: base, sauce, cheese, toppings, then size.
    #[must_use]
    pub fn customizations(&self) -> Vec<String> {
        let exclusive = Category::CUSTOMIZATION_ORDER
            .iter()
            .filter_map(|category| self.state.exclusive.get(category))
            .map(|choice| choice.name.clone());
        let toppings = self.state.toppings.names().map(str::to_owned);
        let size = self
            .state
            .exclusive
            .get(&Category::Size)
            .map(|choice| choice.name.clone());

        exclusive.chain(toppings).chain(size).collect()
    }

    /// Put the slice in the cart and start over.
    pub fn finalize(&mut self, cart: &mut Cart) -> FinishedSlice {
        let finished = FinishedSlice {
            price: self.price(),
            customizations: self.customizations(),
        };
        cart.add(
            CUSTOM_SLICE_NAME,
            finished.price,
            CUSTOM_SLICE_IMAGE,
            finished.customizations.clone(),
        );

        self.reset();
        finished
    }

    /// Back to step 1 with default choices.
    pub fn reset(&mut self) {
        self.state = BuilderState::defaults(self.layout);
    }

    #[must_use]
    pub fn current(&self) -> Option<Step> {
        self.layout.step(self.state.current_step)
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.state.current_step >= self.layout.step_count()
    }

    /// Label for the forward button.
    #[must_use]
    pub fn next_label(&self) -> String {
        if self.is_last_step() {
            return "Complete Your Slice".to_string();
        }
        self.layout
            .step(self.state.current_step + 1)
            .map_or_else(|| "Next".to_string(), |step| format!("Next: Choose {}", step.title()))
    }

    /// Whether the back button is disabled.
    #[must_use]
    pub const fn at_first_step(&self) -> bool {
        self.state.current_step <= 1
    }

    /// Rows for the "your slice" summary box.
    #[must_use]
    pub fn summary(&self) -> Vec<SummaryLine> {
        let name_of = |category| {
            self.state
                .exclusive
                .get(&category)
                .map_or_else(|| "None".to_string(), |c: &Choice| c.name.clone())
        };

        let mut lines: Vec<SummaryLine> = Category::CUSTOMIZATION_ORDER
            .iter()
            .map(|&category| SummaryLine {
                label: category.title(),
                value: name_of(category),
            })
            .collect();

        let toppings = if self.state.toppings.is_empty() {
            "None".to_string()
        } else {
            self.state.toppings.names().collect::<Vec<_>>().join(", ")
        };
        lines.push(SummaryLine {
            label: "Toppings",
            value: toppings,
        });

        if self.layout.offers(Category::Size) {
            lines.push(SummaryLine {
                label: Category::Size.title(),
                value: name_of(Category::Size),
            });
        }
        lines
    }
}
