//! Storage for storefront data.
//!
//! Carts and builder progress live in the session. The only shared data is
//! the review list, kept in a small key-value store under the key
//! [`REVIEWS_KEY`](your_slice_core::review::REVIEWS_KEY).
//!
//! # Backends
//!
//! - In-memory (default) - lost on restart
//! - JSON file - one object mapping keys to string values, set with
//!   `STOREFRONT_REVIEWS_PATH`

pub mod reviews;
pub mod store;

pub use reviews::ReviewRepository;
pub use store::KeyValueStore;

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
