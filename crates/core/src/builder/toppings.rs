//! Bounded, order-preserving topping selection.

use serde::{Deserialize, Serialize};

use crate::Price;

/// A topping on the slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    pub name: String,
    pub price: Price,
}

impl Topping {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// What a toggle did to the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set was already at capacity; nothing changed.
    Full,
}

/// Toppings unique by name, in the order they were picked, at most
/// [`ToppingSet::CAPACITY`] of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToppingSet(Vec<Topping>);

impl ToppingSet {
    pub const CAPACITY: usize = 3;

    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Remove the topping if present, otherwise add it when there is room.
    pub fn toggle(&mut self, topping: Topping) -> ToggleOutcome {
        if let Some(pos) = self.0.iter().position(|t| t.name == topping.name) {
            self.0.remove(pos);
            ToggleOutcome::Removed
        } else if self.0.len() < Self::CAPACITY {
            self.0.push(topping);
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Full
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|t| t.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.len() >= Self::CAPACITY
    }

    /// Sum of topping prices.
    #[must_use]
    pub fn price(&self) -> Price {
        self.0.iter().map(|t| t.price).sum()
    }

    /// Topping names in selection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Topping> {
        self.0.iter()
    }

    /// Counter text shown under the topping grid, e.g. `2/3 toppings selected`.
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("{}/{} toppings selected", self.0.len(), Self::CAPACITY)
    }
}

impl<'a> IntoIterator for &'a ToppingSet {
    type Item = &'a Topping;
    type IntoIter = std::slice::Iter<'a, Topping>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topping(name: &str) -> Topping {
        Topping::new(name, Price::from_cents(100))
    }

    #[test]
    fn test_fourth_topping_is_rejected() {
        let mut set = ToppingSet::new();
        assert_eq!(set.toggle(topping("Olives")), ToggleOutcome::Added);
        assert_eq!(set.toggle(topping("Mushrooms")), ToggleOutcome::Added);
        assert_eq!(set.toggle(topping("Onion")), ToggleOutcome::Added);
        assert_eq!(set.toggle(topping("Pepper")), ToggleOutcome::Full);

        let names: Vec<_> = set.names().collect();
        assert_eq!(names, ["Olives", "Mushrooms", "Onion"]);
    }

    #[test]
    fn test_toggle_removes_and_frees_a_slot() {
        let mut set = ToppingSet::new();
        for name in ["Olives", "Mushrooms", "Onion"] {
            set.toggle(topping(name));
        }
        assert!(set.is_full());
        assert_eq!(set.toggle(topping("Mushrooms")), ToggleOutcome::Removed);
        assert_eq!(set.toggle(topping("Pepper")), ToggleOutcome::Added);

        let names: Vec<_> = set.names().collect();
        assert_eq!(names, ["Olives", "Onion", "Pepper"]);
    }

    #[test]
    fn test_price_and_counter() {
        let mut set = ToppingSet::new();
        set.toggle(Topping::new("Ham", Price::from_cents(150)));
        set.toggle(Topping::new("Olives", Price::from_cents(100)));
        assert_eq!(set.price(), Price::from_cents(250));
        assert_eq!(set.counter_label(), "2/3 toppings selected");
    }
}
