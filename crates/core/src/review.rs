//! Customer reviews.
//!
//! Reviews are kept as one JSON array under a single storage key. Records
//! have no id; deleting removes the first record equal in every field.
//! Ratings are stored as text (`"rating":"5"`), the value a rating
//! `<select>` submits, and plain numbers are read as well.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Storage key holding the serialized review list.
pub const REVIEWS_KEY: &str = "reviews";

/// Errors that can occur when validating a review submission.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("please tell us your name")]
    MissingName,
    #[error("please write a few words about your visit")]
    MissingText,
    #[error("rating must be between {min} and {max} stars")]
    RatingOutOfRange { min: u8, max: u8 },
}

/// Star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct Rating(u8);

/// A rating as found in storage.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRating {
    Number(u8),
    Text(String),
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns [`ReviewError::RatingOutOfRange`] outside 1..=5.
    pub const fn new(stars: u8) -> Result<Self, ReviewError> {
        if stars >= Self::MIN && stars <= Self::MAX {
            Ok(Self(stars))
        } else {
            Err(ReviewError::RatingOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Parse a rating from a form field.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::RatingOutOfRange`] for anything that is not a
    /// whole number from 1 to 5.
    pub fn parse(input: &str) -> Result<Self, ReviewError> {
        input
            .trim()
            .parse::<u8>()
            .map_err(|_| ReviewError::RatingOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            })
            .and_then(Self::new)
    }

    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match StoredRating::deserialize(deserializer)? {
            StoredRating::Number(stars) => Self::new(stars),
            StoredRating::Text(text) => Self::parse(&text),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl From<Rating> for String {
    fn from(rating: Rating) -> Self {
        rating.0.to_string()
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★", self.0)
    }
}

/// A stored review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub rating: Rating,
    pub text: String,
}

impl Review {
    /// Validate raw form input into a review.
    ///
    /// Name and text are trimmed and must not be empty.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a [`ReviewError`].
    pub fn from_form(name: &str, rating: &str, text: &str) -> Result<Self, ReviewError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ReviewError::MissingName);
        }
        let rating = Rating::parse(rating)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ReviewError::MissingText);
        }

        Ok(Self {
            name: name.to_owned(),
            rating,
            text: text.to_owned(),
        })
    }
}

/// A decoded review list plus the number of records that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedReviews {
    pub book: ReviewBook,
    /// Records in the array that are not valid reviews.
    pub skipped: usize,
}

/// The review list in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewBook(Vec<Review>);

impl ReviewBook {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode the stored JSON array.
    ///
    /// A record that is not a valid review is skipped and counted; the rest
    /// of the list is kept.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the stored value is not a JSON array.
    pub fn from_json(raw: &str) -> Result<DecodedReviews, serde_json::Error> {
        let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
        let mut decoded = DecodedReviews::default();
        for record in records {
            match serde_json::from_value::<Review>(record) {
                Ok(review) => decoded.book.push(review),
                Err(_) => decoded.skipped += 1,
            }
        }
        Ok(decoded)
    }

    /// Encode as a JSON array.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which plain strings and
    /// numbers never do.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    pub fn push(&mut self, review: Review) {
        self.0.push(review);
    }

    /// Remove the first review equal to `review`. Returns whether one was removed.
    pub fn remove(&mut self, review: &Review) -> bool {
        self.0
            .iter()
            .position(|r| r == review)
            .map(|pos| self.0.remove(pos))
            .is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn review(name: &str, stars: u8, text: &str) -> Review {
        Review {
            name: name.to_owned(),
            rating: Rating::new(stars).unwrap(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_from_form_trims_and_validates() {
        let r = Review::from_form("  Aino ", "5", " Great crust! ").unwrap();
        assert_eq!(r, review("Aino", 5, "Great crust!"));

        assert_eq!(Review::from_form(" ", "4", "ok"), Err(ReviewError::MissingName));
        assert_eq!(Review::from_form("Aino", "4", "  "), Err(ReviewError::MissingText));
        assert!(matches!(
            Review::from_form("Aino", "6", "ok"),
            Err(ReviewError::RatingOutOfRange { .. })
        ));
        assert!(matches!(
            Review::from_form("Aino", "", "ok"),
            Err(ReviewError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut book = ReviewBook::new();
        book.push(review("Aino", 5, "Great"));
        book.push(review("Ville", 3, "Fine"));
        book.push(review("Aino", 5, "Great"));

        assert!(book.remove(&review("Aino", 5, "Great")));
        assert_eq!(book.len(), 2);
        assert!(!book.remove(&review("Aino", 4, "Great")));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_stored_format_is_plain_array() {
        let mut book = ReviewBook::new();
        book.push(review("Aino", 4, "Tasty"));
        let json = book.to_json().unwrap();
        assert_eq!(json, r#"[{"name":"Aino","rating":"4","text":"Tasty"}]"#);

        let decoded = ReviewBook::from_json(&json).unwrap();
        assert_eq!(decoded.book, book);
        assert_eq!(decoded.skipped, 0);
    }

    #[test]
    fn test_text_and_number_ratings_both_decode() {
        let raw = r#"[{"name":"Aino","rating":"5","text":"Great"},{"name":"Ville","rating":4,"text":"Good"}]"#;
        let decoded = ReviewBook::from_json(raw).unwrap();
        assert_eq!(decoded.skipped, 0);
        let stars: Vec<_> = decoded.book.iter().map(|r| r.rating.stars()).collect();
        assert_eq!(stars, [5, 4]);
    }

    #[test]
    fn test_bad_records_are_skipped_not_fatal() {
        let raw = r#"[{"name":"A","rating":9,"text":"x"},{"name":"B","rating":"five","text":"y"},{"oops":true},{"name":"C","rating":"3","text":"Fine"}]"#;
        let decoded = ReviewBook::from_json(raw).unwrap();
        assert_eq!(decoded.skipped, 3);
        assert_eq!(decoded.book.len(), 1);
        assert_eq!(decoded.book.iter().next().unwrap().name, "C");
    }

    #[test]
    fn test_non_array_value_is_an_error() {
        assert!(ReviewBook::from_json("{oops").is_err());
        assert!(ReviewBook::from_json(r#"{"name":"A"}"#).is_err());
    }
}
