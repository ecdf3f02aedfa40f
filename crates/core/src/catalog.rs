//! Back-office product table.

use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// Notice shown when a new product fails validation.
pub const INVALID_PRODUCT_NOTICE: &str = "Please enter a valid product name and price.";

/// Errors that can occur when adding a product.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("product price must be a number greater than zero")]
    InvalidPrice,
}

impl ProductError {
    /// The message shown to staff, which is the same for every failure.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        INVALID_PRODUCT_NOTICE
    }
}

/// One row of the product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// The product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    rows: Vec<ProductRow>,
    next_id: ProductId,
}

impl ProductCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: ProductId::new(1),
        }
    }

    /// The demo rows the back office starts with.
    #[must_use]
    pub fn sample() -> Self {
        let mut catalog = Self::new();
        for (name, cents) in [
            ("Margherita", 800),
            ("Pepperoni Supreme", 950),
            ("Veggie Delight", 900),
            ("BBQ Chicken", 1050),
        ] {
            let _ = catalog.insert(name.to_string(), Price::from_cents(cents));
        }
        catalog
    }

    fn insert(&mut self, name: String, price: Price) -> ProductRow {
        let id = self.next_id;
        self.next_id = id.next();
        let row = ProductRow { id, name, price };
        self.rows.push(row.clone());
        row
    }

    /// Add a product from form input.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyName`] if the trimmed name is empty and
    /// [`ProductError::InvalidPrice`] unless the price parses and is above zero.
    pub fn add(&mut self, name: &str, price: &str) -> Result<ProductRow, ProductError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        let price = Price::parse(price).map_err(|_| ProductError::InvalidPrice)?;
        if price.is_zero() {
            return Err(ProductError::InvalidPrice);
        }
        Ok(self.insert(name.to_string(), price))
    }

    /// Delete a row once confirmed. Returns whether a row was removed.
    pub fn delete(&mut self, id: ProductId, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    #[must_use]
    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_formats() {
        let mut catalog = ProductCatalog::new();
        let row = catalog.add("  Calzone ", "12.5").unwrap();
        assert_eq!(row.name, "Calzone");
        assert_eq!(row.price.to_string(), "€12.50");
        assert_eq!(row.id, ProductId::new(1));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut catalog = ProductCatalog::new();
        assert_eq!(catalog.add("   ", "5"), Err(ProductError::EmptyName));
        assert_eq!(catalog.add("Calzone", "abc"), Err(ProductError::InvalidPrice));
        assert_eq!(catalog.add("Calzone", "0"), Err(ProductError::InvalidPrice));
        assert_eq!(catalog.add("Calzone", "-3"), Err(ProductError::InvalidPrice));
        assert_eq!(catalog.add("Calzone", "100000.01"), Err(ProductError::InvalidPrice));
        assert!(catalog.is_empty());
        assert_eq!(
            ProductError::InvalidPrice.notice(),
            "Please enter a valid product name and price."
        );
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut catalog = ProductCatalog::sample();
        let id = catalog.rows()[0].id;
        assert!(!catalog.delete(id, false));
        assert_eq!(catalog.len(), 4);
        assert!(catalog.delete(id, true));
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.delete(id, true));
    }

    #[test]
    fn test_ids_keep_increasing_after_delete() {
        let mut catalog = ProductCatalog::sample();
        let last = catalog.rows()[3].id;
        catalog.delete(last, true);
        let added = catalog.add("Calzone", "11").unwrap().id;
        assert!(added > last);
    }
}
