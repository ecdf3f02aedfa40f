//! Type-safe price representation using decimal arithmetic.
//!
//! All menu prices are euro amounts with two decimal places of display
//! precision. Arithmetic stays in [`Decimal`] so totals never pick up
//! floating point drift.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when strictly parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number, got {0:?}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed {}", Price::MAX)]
    TooLarge,
}

/// A non-negative euro amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Highest amount accepted from user input (€100 000).
    pub const MAX: Self = Self::from_cents(10_000_000);

    /// Currency symbol used when formatting.
    pub const SYMBOL: &'static str = "€";

    /// Create a price from a decimal amount, clamping negatives to zero.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            Self::ZERO
        } else {
            Self(amount)
        }
    }

    /// Create a price from a whole number of cents.
    ///
    /// ```
    /// use your_slice_core::Price;
    ///
    /// assert_eq!(Price::from_cents(250).to_string(), "€2.50");
    /// ```
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self(Decimal::from_parts(cents, 0, 0, false, 2))
    }

    /// Strictly parse a price from user input.
    ///
    /// Accepts surrounding whitespace and an optional leading `€`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number,
    /// negative or above [`Price::MAX`].
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix(Self::SYMBOL).unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = trimmed
            .parse::<Decimal>()
            .map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let amount = amount.abs();
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge);
        }

        Ok(Self(amount))
    }

    /// Leniently coerce user input into a price.
    ///
    /// Anything [`Price::parse`] rejects becomes zero.
    ///
    /// ```
    /// use your_slice_core::Price;
    ///
    /// assert_eq!(Price::coerce("€8.00"), Price::from_cents(800));
    /// assert_eq!(Price::coerce("free"), Price::ZERO);
    /// ```
    #[must_use]
    pub fn coerce(input: &str) -> Self {
        Self::parse(input).unwrap_or_default()
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a quantity. Saturates at the largest decimal.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Scale by a non-negative factor, such as a size multiplier.
    #[must_use]
    pub fn scaled(self, factor: Decimal) -> Self {
        Self::new(self.0.saturating_mul(factor))
    }

    /// Format for display, e.g. `€16.00`.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Self::SYMBOL, self.0.round_dp(2))
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at the largest decimal.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
