//! Home page route handler.
//!
//! The site is a single page: popular menu, slice builder, lunch menu and
//! reviews, with the cart panel and the login/signup dialogs on top. Each
//! section is also served on its own as an HTMX fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;
use your_slice_core::menu::POPULAR;

use super::builder::load_configurator;
use super::cart::load_cart;
use super::lunch::today;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;
use crate::views::{BuilderView, CartView, LunchView, MenuItemView, Notice, ReviewsView};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub customer: Option<String>,
    pub popular: Vec<MenuItemView>,
    pub cart: CartView,
    /// Cart panel notice slot, always empty on a full page load.
    pub notice: Option<Notice>,
    pub builder: BuilderView,
    pub lunch: LunchView,
    pub reviews: ReviewsView,
}

/// Display the home page.
#[instrument(skip(state, session, customer))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(customer): OptionalAuth,
) -> Result<HomeTemplate> {
    let cart = load_cart(&session).await;
    let configurator = load_configurator(&state, &session).await;
    let book = state.reviews().list().await?;

    Ok(HomeTemplate {
        customer: customer.map(|c| c.email.to_string()),
        popular: POPULAR.iter().map(MenuItemView::from).collect(),
        cart: CartView::from(&cart),
        notice: None,
        builder: BuilderView::new(&configurator, None),
        lunch: LunchView::new(state.lunch(), today()),
        reviews: ReviewsView::new(&book, None),
    })
}
