//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (menu, builder, lunch, reviews, cart panel)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments, mutations trigger `cart-updated`)
//! GET  /cart                   - Cart panel fragment
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add one unit (name, price, image, customizations)
//! POST /cart/increment         - Quantity +1 at index
//! POST /cart/decrement         - Quantity -1 at index, removing at 1
//! POST /cart/remove            - Remove line at index
//! POST /cart/open              - Open the cart panel
//! POST /cart/close             - Close the cart panel
//! POST /checkout               - Checkout notice
//!
//! # Slice builder (returns the builder fragment)
//! GET  /builder                - Current step
//! POST /builder/select         - Choose a base, sauce, cheese or size
//! POST /builder/topping        - Toggle a topping
//! POST /builder/next           - Next step, or add the slice to the cart on the last
//! POST /builder/prev           - Previous step
//! POST /builder/reset          - Start over
//!
//! # Lunch
//! GET  /lunch?day=monday       - Lunch menu for a day (default: today)
//! POST /lunch/add              - Add a day's vegan or meat dish
//!
//! # Reviews
//! GET  /reviews                - Review list
//! POST /reviews                - Add a review
//! POST /reviews/delete         - Delete a review (confirmed)
//!
//! # Customer dialogs
//! POST /auth/login             - Login
//! POST /auth/signup            - Create account
//! POST /auth/logout            - Logout
//! ```

pub mod auth;
pub mod builder;
pub mod cart;
pub mod home;
pub mod lunch;
pub mod reviews;

use axum::{
    Router,
    http::{HeaderName, HeaderValue},
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// HTMX event fired whenever the cart changes.
pub const CART_UPDATED: &str = "cart-updated";

/// `HX-Trigger` header announcing a cart change.
#[must_use]
pub fn cart_updated_header() -> [(HeaderName, HeaderValue); 1] {
    [(
        HeaderName::from_static("hx-trigger"),
        HeaderValue::from_static(CART_UPDATED),
    )]
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

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create the builder routes router.
pub fn builder_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(builder::show))
        .route("/select", post(builder::select))
        .route("/topping", post(builder::topping))
        .route("/next", post(builder::next))
        .route("/prev", post(builder::prev))
        .route("/reset", post(builder::reset))
}

/// Create the lunch routes router.
pub fn lunch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(lunch::show))
        .route("/add", post(lunch::add))
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::index).post(reviews::create))
        .route("/delete", post(reviews::delete))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/builder", builder_routes())
        .nest("/lunch", lunch_routes())
        .nest("/reviews", review_routes())
        .nest("/auth", auth_routes())
}
