//! HTTP route handlers for the back office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Auth (name, staff email and password form)
//! GET  /auth/login                  - Login page
//! POST /auth/login                  - Submit login (per-field errors on failure)
//! POST /auth/logout                 - Logout
//!
//! # Dashboard
//! GET  /                            - Order and product overview
//!
//! # Orders
//! GET  /orders?q=&status=           - Orders page
//! GET  /orders/table?q=&status=     - Orders table fragment
//! POST /orders/{id}/action          - Row action (process, complete, cancel, delete, view, edit)
//!
//! # Products
//! GET  /products                    - Products page
//! POST /products                    - Add a product
//! POST /products/{id}/delete        - Delete a product (confirmed)
//! ```
//!
//! Every route except the login form requires a signed-in staff member.

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::Router;
use serde::Deserialize;

use crate::state::AppState;

/// Create all routes for the back office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(orders::router())
        .merge(products::router())
}

/// Deserialize an HTML checkbox or hidden flag (`true`, `on`, `1`, `yes`).
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    }))
}
