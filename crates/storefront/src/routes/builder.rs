//! Slice builder route handlers.
//!
//! Progress is stored in the session as a `BuilderState` and replayed against
//! the site's layout on every request. Option prices always come from the
//! layout, never from the form.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use your_slice_core::builder::{Advance, BuilderState, Category, Configurator, ToggleOutcome};

use super::cart::{load_cart, save_cart};
use super::cart_updated_header;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::save;
use crate::models::session_keys;
use crate::state::AppState;
use crate::views::{BuilderTemplate, BuilderView, Notice};

/// Notice shown when a finished slice goes into the cart.
pub const SLICE_ADDED_NOTICE: &str = "Your custom slice has been added to the cart!";

/// Notice shown when a fourth topping is picked.
pub const TOPPINGS_FULL_NOTICE: &str = "You can choose up to 3 toppings.";

// =============================================================================
// Session Helpers
// =============================================================================

/// Resume the visitor's builder, or start one from defaults.
pub async fn load_configurator<'a>(state: &'a AppState, session: &Session) -> Configurator<'a> {
    let saved = session
        .get::<BuilderState>(session_keys::BUILDER)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read builder state, starting over");
            None
        });

    match saved {
        Some(saved) => Configurator::resume(state.layout(), saved),
        None => Configurator::new(state.layout()),
    }
}

async fn save_configurator(session: &Session, configurator: &Configurator<'_>) -> Result<()> {
    save(session, session_keys::BUILDER, configurator.state()).await?;
    Ok(())
}

fn render(configurator: &Configurator<'_>, notice: Option<Notice>) -> BuilderTemplate {
    BuilderTemplate {
        builder: BuilderView::new(configurator, notice),
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Exclusive option form data.
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub category: String,
    pub name: String,
}

/// Topping toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToppingForm {
    pub name: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Current builder step.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> BuilderTemplate {
    let configurator = load_configurator(&state, &session).await;
    render(&configurator, None)
}

/// Choose an option in an exclusive category.
#[instrument(skip(state, session))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SelectForm>,
) -> Result<BuilderTemplate> {
    let category: Category = form.category.parse().map_err(AppError::BadRequest)?;

    let mut configurator = load_configurator(&state, &session).await;
    configurator
        .select_exclusive(category, form.name.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    save_configurator(&session, &configurator).await?;

    Ok(render(&configurator, None))
}

/// Toggle a topping on or off. A fourth topping is refused with a notice.
#[instrument(skip(state, session))]
pub async fn topping(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ToppingForm>,
) -> Result<BuilderTemplate> {
    let mut configurator = load_configurator(&state, &session).await;
    let outcome = configurator
        .toggle_topping(form.name.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    save_configurator(&session, &configurator).await?;

    let notice = (outcome == ToggleOutcome::Full).then(|| Notice::info(TOPPINGS_FULL_NOTICE));
    Ok(render(&configurator, notice))
}

/// Go to the next step. On the last step the slice is added to the cart and
/// the builder starts over.
#[instrument(skip(state, session))]
pub async fn next(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut configurator = load_configurator(&state, &session).await;
    let mut cart = load_cart(&session).await;

    match configurator.advance_step(&mut cart) {
        Advance::Moved(step) => {
            tracing::debug!(step, "Builder advanced");
            save_configurator(&session, &configurator).await?;
            Ok(render(&configurator, None).into_response())
        }
        Advance::Finished(slice) => {
            save_cart(&session, &cart).await?;
            save_configurator(&session, &configurator).await?;

            let price = slice.price.to_string();
            add_breadcrumb("builder", "Finished slice", &[("price", &price)]);
            tracing::info!(price = %slice.price, customizations = ?slice.customizations, "Custom slice added to cart");

            Ok((
                cart_updated_header(),
                render(&configurator, Some(Notice::success(SLICE_ADDED_NOTICE))),
            )
                .into_response())
        }
    }
}

/// Go back one step.
#[instrument(skip(state, session))]
pub async fn prev(State(state): State<AppState>, session: Session) -> Result<BuilderTemplate> {
    let mut configurator = load_configurator(&state, &session).await;
    configurator.retreat_step();
    save_configurator(&session, &configurator).await?;
    Ok(render(&configurator, None))
}

/// Discard the current slice and start over.
#[instrument(skip(state, session))]
pub async fn reset(State(state): State<AppState>, session: Session) -> Result<BuilderTemplate> {
    let mut configurator = load_configurator(&state, &session).await;
    configurator.reset();
    save_configurator(&session, &configurator).await?;
    Ok(render(&configurator, None))
}
