//! Session-related types.
//!
//! Each visitor's cart and builder progress are stored in their session, so
//! no state is shared between visitors.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tower_sessions::Session;

use your_slice_core::Email;

/// Session-stored customer identity from the demo login dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for the logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the visitor's slice builder progress.
    pub const BUILDER: &str = "builder";
}

/// Load a value from the session, falling back to its default.
///
/// Unreadable values are logged and replaced by the default; they are
/// overwritten on the next save.
pub async fn load_or_default<T>(session: &Session, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match session.get::<T>(key).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read session value, using default");
            T::default()
        }
    }
}

/// Store a value in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save<T>(session: &Session, key: &str, value: &T) -> Result<(), tower_sessions::session::Error>
where
    T: Serialize + Send + Sync,
{
    session.insert(key, value).await
}
