//! Builder layouts: which steps a slice goes through and what each offers.
//!
//! The classic layout walks base, sauce, cheese and toppings. The sized
//! layout appends a size step whose choice carries a price multiplier.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::toppings::Topping;
use crate::Price;

/// Product name given to finished slices.
pub const CUSTOM_SLICE_NAME: &str = "Custom Pizza Slice";

/// Image shown next to finished slices in the cart.
pub const CUSTOM_SLICE_IMAGE: &str = "https://images.unsplash.com/photo-1513104890138-7c749659a591?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80";

/// A dimension of the slice where exactly one option is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Base,
    Sauce,
    Cheese,
    Size,
}

impl Category {
    /// Order in which chosen names appear in the cart line.
    pub const CUSTOMIZATION_ORDER: [Self; 3] = [Self::Base, Self::Sauce, Self::Cheese];

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Sauce => "Sauce",
            Self::Cheese => "Cheese",
            Self::Size => "Size",
        }
    }

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Sauce => "sauce",
            Self::Cheese => "cheese",
            Self::Size => "size",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "sauce" => Ok(Self::Sauce),
            "cheese" => Ok(Self::Cheese),
            "size" => Ok(Self::Size),
            _ => Err(format!("invalid builder category: {s}")),
        }
    }
}

/// One position in the builder walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Choose(Category),
    Toppings,
}

impl Step {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Choose(category) => category.title(),
            Self::Toppings => "Toppings",
        }
    }

    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Choose(category) => Some(*category),
            Self::Toppings => None,
        }
    }
}

/// A selectable card in an exclusive category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    pub price: Price,
    /// Only set for sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
}

impl Choice {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
            multiplier: None,
        }
    }

    #[must_use]
    pub fn sized(name: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            name: name.into(),
            price: Price::ZERO,
            multiplier: Some(multiplier),
        }
    }
}

/// How the size multiplier applies to the slice price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePricing {
    /// Multiply everything, the plain slice price included.
    #[default]
    WholeSlice,
    /// Multiply the chosen options and toppings; the plain slice price is fixed.
    ExtrasOnly,
}

impl std::str::FromStr for SizePricing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole_slice" | "whole-slice" => Ok(Self::WholeSlice),
            "extras_only" | "extras-only" => Ok(Self::ExtrasOnly),
            _ => Err(format!("invalid size pricing: {s}")),
        }
    }
}

/// Steps, prices and option catalogue for one builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderLayout {
    steps: Vec<Step>,
    base_price: Price,
    choices: BTreeMap<Category, Vec<Choice>>,
    toppings: Vec<Topping>,
    preselected: Vec<Category>,
    size_pricing: SizePricing,
}

impl BuilderLayout {
    /// Start a layout from steps and a plain slice price.
    ///
    /// Categories named by a [`Step::Choose`] start with no options; add them
    /// with [`BuilderLayout::with_choices`].
    #[must_use]
    pub fn new(steps: Vec<Step>, base_price: Price) -> Self {
        Self {
            steps,
            base_price,
            choices: BTreeMap::new(),
            toppings: Vec::new(),
            preselected: Vec::new(),
            size_pricing: SizePricing::default(),
        }
    }

    #[must_use]
    pub fn with_choices(mut self, category: Category, choices: Vec<Choice>) -> Self {
        self.choices.insert(category, choices);
        self
    }

    #[must_use]
    pub fn with_toppings(mut self, toppings: Vec<Topping>) -> Self {
        self.toppings = toppings;
        self
    }

    /// Categories whose first option is picked before the customer does anything.
    #[must_use]
    pub fn with_preselected(mut self, categories: Vec<Category>) -> Self {
        self.preselected = categories;
        self
    }

    #[must_use]
    pub const fn with_size_pricing(mut self, size_pricing: SizePricing) -> Self {
        self.size_pricing = size_pricing;
        self
    }

    /// Base, sauce, cheese, toppings at €3.00 a slice.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(
            vec![
                Step::Choose(Category::Base),
                Step::Choose(Category::Sauce),
                Step::Choose(Category::Cheese),
                Step::Toppings,
            ],
            Price::from_cents(300),
        )
        .with_choices(
            Category::Base,
            vec![
                Choice::new("Original", Price::ZERO),
                Choice::new("Thin Crust", Price::from_cents(50)),
                Choice::new("Whole Wheat", Price::from_cents(75)),
                Choice::new("Gluten Free", Price::from_cents(100)),
            ],
        )
        .with_choices(
            Category::Sauce,
            vec![
                Choice::new("Tomato Sauce", Price::ZERO),
                Choice::new("BBQ Sauce", Price::from_cents(50)),
                Choice::new("Pesto Sauce", Price::from_cents(75)),
                Choice::new("None", Price::ZERO),
            ],
        )
        .with_choices(
            Category::Cheese,
            vec![
                Choice::new("Mozzarella", Price::ZERO),
                Choice::new("Cheddar Cheese", Price::from_cents(50)),
                Choice::new("Vegan Cheese", Price::from_cents(75)),
                Choice::new("None", Price::ZERO),
            ],
        )
        .with_toppings(vec![
            Topping::new("Pepperoni", Price::from_cents(150)),
            Topping::new("Mushrooms", Price::from_cents(100)),
            Topping::new("Olives", Price::from_cents(100)),
            Topping::new("Onion", Price::from_cents(100)),
            Topping::new("Pepper", Price::from_cents(100)),
            Topping::new("Ham", Price::from_cents(150)),
            Topping::new("Pineapple", Price::from_cents(100)),
            Topping::new("Jalapenos", Price::from_cents(75)),
        ])
        .with_preselected(vec![Category::Base, Category::Sauce, Category::Cheese])
    }

    /// The classic walk followed by a size step.
    ///
    /// Size is not preselected; entering the size step picks the first size.
    #[must_use]
    pub fn sized(size_pricing: SizePricing) -> Self {
        let mut layout = Self::classic()
            .with_choices(
                Category::Size,
                vec![
                    Choice::sized("Regular", Decimal::ONE),
                    Choice::sized("Large", Decimal::new(15, 1)),
                    Choice::sized("Family", Decimal::TWO),
                ],
            )
            .with_size_pricing(size_pricing);
        layout.steps.push(Step::Choose(Category::Size));
        layout
    }

    /// Number of steps; the last one finalizes.
    #[must_use]
    pub fn step_count(&self) -> u8 {
        u8::try_from(self.steps.len()).unwrap_or(u8::MAX)
    }

    /// The step at 1-based `position`.
    #[must_use]
    pub fn step(&self, position: u8) -> Option<Step> {
        let index = usize::from(position).checked_sub(1)?;
        self.steps.get(index).copied()
    }

    pub fn steps(&self) -> impl Iterator<Item = (u8, Step)> + '_ {
        (1_u8..).zip(self.steps.iter().copied())
    }

    #[must_use]
    pub const fn base_price(&self) -> Price {
        self.base_price
    }

    #[must_use]
    pub const fn size_pricing(&self) -> SizePricing {
        self.size_pricing
    }

    /// Whether any step asks for `category`.
    #[must_use]
    pub fn offers(&self, category: Category) -> bool {
        self.steps.contains(&Step::Choose(category))
    }

    /// Options for `category`, in card order.
    #[must_use]
    pub fn choices(&self, category: Category) -> &[Choice] {
        self.choices.get(&category).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn choice(&self, category: Category, name: &str) -> Option<&Choice> {
        self.choices(category).iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn first_choice(&self, category: Category) -> Option<&Choice> {
        self.choices(category).first()
    }

    #[must_use]
    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }

    #[must_use]
    pub fn topping(&self, name: &str) -> Option<&Topping> {
        self.toppings.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn preselected(&self) -> &[Category] {
        &self.preselected
    }
}

impl Default for BuilderLayout {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_has_four_steps() {
        let layout = BuilderLayout::classic();
        assert_eq!(layout.step_count(), 4);
        assert_eq!(layout.step(1), Some(Step::Choose(Category::Base)));
        assert_eq!(layout.step(4), Some(Step::Toppings));
        assert_eq!(layout.step(0), None);
        assert_eq!(layout.step(5), None);
        assert!(!layout.offers(Category::Size));
    }

    #[test]
    fn test_sized_appends_size_step() {
        let layout = BuilderLayout::sized(SizePricing::ExtrasOnly);
        assert_eq!(layout.step_count(), 5);
        assert_eq!(layout.step(5), Some(Step::Choose(Category::Size)));
        assert_eq!(layout.size_pricing(), SizePricing::ExtrasOnly);
        assert!(!layout.preselected().contains(&Category::Size));
    }

    #[test]
    fn test_defaults_are_first_cards() {
        let layout = BuilderLayout::classic();
        let first = |c| layout.first_choice(c).map(|c| c.name.as_str());
        assert_eq!(first(Category::Base), Some("Original"));
        assert_eq!(first(Category::Sauce), Some("Tomato Sauce"));
        assert_eq!(first(Category::Cheese), Some("Mozzarella"));
    }

    #[test]
    fn test_category_and_pricing_parse() {
        assert_eq!("Sauce".parse::<Category>(), Ok(Category::Sauce));
        assert!("crust".parse::<Category>().is_err());
        assert_eq!(
            "extras-only".parse::<SizePricing>(),
            Ok(SizePricing::ExtrasOnly)
        );
    }
}
