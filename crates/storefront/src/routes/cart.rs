//! Cart route handlers.
//!
//! The cart lives in the session. Every mutation answers with the whole cart
//! panel and an `HX-Trigger: cart-updated` header so the count badge can
//! refresh itself.

use axum::{
    Form,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use your_slice_core::Price;
use your_slice_core::cart::{Cart, LineChange};

use super::cart_updated_header;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{load_or_default, save};
use crate::models::session_keys;
use crate::views::{CartCountTemplate, CartPanelTemplate, Notice, NoticeTemplate};

/// Notice shown when checking out with items.
pub const CHECKOUT_NOTICE: &str =
    "Proceeding to checkout! This would open a checkout form in a real application.";

/// Notice shown when checking out an empty cart.
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty. Add some items first!";

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart from the session.
pub async fn load_cart(session: &Session) -> Cart {
    load_or_default(session, session_keys::CART).await
}

/// Store the visitor's cart in the session.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    save(session, session_keys::CART, cart).await?;
    Ok(())
}

/// Save the cart and answer with the panel plus the change trigger.
async fn respond_with_panel(session: &Session, cart: &Cart) -> Result<Response> {
    save_cart(session, cart).await?;
    Ok((cart_updated_header(), CartPanelTemplate::new(cart)).into_response())
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
///
/// `customizations` is a `|`-separated list; blank entries are dropped.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub customizations: String,
}

impl AddToCartForm {
    fn customization_list(&self) -> Vec<String> {
        self.customizations
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Line index form data.
///
/// Kept as text: an index that is not a whole number is ignored.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    #[serde(default)]
    pub index: String,
}

impl LineForm {
    fn index(&self) -> Option<usize> {
        self.index.trim().parse().ok()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart panel fragment.
#[instrument(skip(session))]
pub async fn show(session: Session) -> CartPanelTemplate {
    CartPanelTemplate::new(&load_cart(&session).await)
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    CartCountTemplate {
        count: load_cart(&session).await.item_count(),
    }
}

/// Add one unit of a product. Opens the cart panel.
///
/// The price is read leniently: text that is not a non-negative number
/// counts as zero.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Missing product name.".to_string()));
    }

    let mut cart = load_cart(&session).await;
    cart.add(
        name,
        Price::coerce(&form.price),
        form.image.trim(),
        form.customization_list(),
    );
    add_breadcrumb("cart", "Added item", &[("name", name)]);
    tracing::info!(item = name, count = cart.item_count(), "Added to cart");

    respond_with_panel(&session, &cart).await
}

/// Apply a quantity control to the line named by the form.
async fn change_line(
    session: &Session,
    form: &LineForm,
    change: impl FnOnce(&mut Cart, usize) -> LineChange,
) -> Result<Response> {
    let mut cart = load_cart(session).await;
    let outcome = form
        .index()
        .map_or(LineChange::Ignored, |index| change(&mut cart, index));
    tracing::debug!(index = %form.index, ?outcome, "Cart line change");
    respond_with_panel(session, &cart).await
}

#[instrument(skip(session))]
pub async fn increment(session: Session, Form(form): Form<LineForm>) -> Result<Response> {
    change_line(&session, &form, Cart::increment).await
}

#[instrument(skip(session))]
pub async fn decrement(session: Session, Form(form): Form<LineForm>) -> Result<Response> {
    change_line(&session, &form, Cart::decrement).await
}

#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<LineForm>) -> Result<Response> {
    change_line(&session, &form, Cart::remove).await
}

#[instrument(skip(session))]
pub async fn open(session: Session) -> Result<CartPanelTemplate> {
    let mut cart = load_cart(&session).await;
    cart.open_panel();
    save_cart(&session, &cart).await?;
    Ok(CartPanelTemplate::new(&cart))
}

#[instrument(skip(session))]
pub async fn close(session: Session) -> Result<CartPanelTemplate> {
    let mut cart = load_cart(&session).await;
    cart.close_panel();
    save_cart(&session, &cart).await?;
    Ok(CartPanelTemplate::new(&cart))
}

/// Checkout notice. The cart is left as it is.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> NoticeTemplate {
    let cart = load_cart(&session).await;
    let notice = if cart.is_empty() {
        Notice::info(EMPTY_CART_NOTICE)
    } else {
        tracing::info!(total = %cart.totals().total, "Checkout started");
        Notice::success(CHECKOUT_NOTICE)
    };
    NoticeTemplate { notice }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customizations_split_on_pipe() {
        let form = AddToCartForm {
            name: "Custom".to_string(),
            price: "4.50".to_string(),
            image: String::new(),
            customizations: " Thin Crust | | Pesto Sauce ".to_string(),
        };
        assert_eq!(form.customization_list(), ["Thin Crust", "Pesto Sauce"]);
    }

    #[test]
    fn test_non_integer_index_is_ignored() {
        let form = |s: &str| LineForm {
            index: s.to_string(),
        };
        assert_eq!(form("2").index(), Some(2));
        assert_eq!(form(" 0 ").index(), Some(0));
        assert_eq!(form("abc").index(), None);
        assert_eq!(form("-1").index(), None);
        assert_eq!(form("1.5").index(), None);
    }
}
