//! Lunch menu route handlers.

use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::{Datelike, Weekday};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use your_slice_core::lunch::LunchOption;

use super::cart::{load_cart, save_cart};
use super::cart_updated_header;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::views::{CartPanelTemplate, LunchTemplate, LunchView};

/// Today's weekday in server local time.
#[must_use]
pub fn today() -> Weekday {
    chrono::Local::now().weekday()
}

/// Parse a day name such as `monday` or `Mon`.
fn parse_day(raw: &str) -> Result<Weekday> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::BadRequest(format!("Unknown day: {raw}")))
}

/// Day selection query.
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: Option<String>,
}

/// Lunch add form data.
#[derive(Debug, Deserialize)]
pub struct AddLunchForm {
    pub day: String,
    pub option: String,
}

/// Lunch section for the requested day, today when none is given.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<LunchTemplate> {
    let day = match query.day.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_day(raw)?,
        None => today(),
    };

    Ok(LunchTemplate {
        lunch: LunchView::new(state.lunch(), day),
    })
}

/// Put a day's vegan or meat dish in the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddLunchForm>,
) -> Result<Response> {
    let day = parse_day(&form.day)?;
    let option: LunchOption = form.option.parse().map_err(AppError::BadRequest)?;

    let mut cart = load_cart(&session).await;
    let dish = state
        .lunch()
        .add_to_cart(&mut cart, day, option)
        .ok_or_else(|| AppError::NotFound(format!("No lunch served on {day}")))?;
    tracing::info!(dish = dish.name, %day, option = option.label(), "Lunch added to cart");

    save_cart(&session, &cart).await?;
    Ok((cart_updated_header(), CartPanelTemplate::new(&cart)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_names() {
        assert!(matches!(parse_day("monday"), Ok(Weekday::Mon)));
        assert!(matches!(parse_day(" Friday "), Ok(Weekday::Fri)));
        assert!(matches!(parse_day("caturday"), Err(AppError::BadRequest(_))));
    }
}
