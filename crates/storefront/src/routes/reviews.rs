//! Review route handlers.

use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;
use your_slice_core::review::{Review, ReviewError};

use super::deserialize_flag;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;
use crate::views::{Notice, ReviewsTemplate, ReviewsView};

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub text: String,
}

/// Review deletion form data.
#[derive(Debug, Deserialize)]
pub struct DeleteReviewForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub confirmed: bool,
}

/// Visitor-facing wording for a rejected review.
const fn rejection_notice(error: &ReviewError) -> &'static str {
    match error {
        ReviewError::MissingName => "Please enter your name.",
        ReviewError::MissingText => "Please write a few words about your visit.",
        ReviewError::RatingOutOfRange { .. } => "Please choose a rating from 1 to 5 stars.",
    }
}

fn parse_review(name: &str, rating: &str, text: &str) -> Result<Review> {
    Review::from_form(name, rating, text)
        .map_err(|e| AppError::BadRequest(rejection_notice(&e).to_string()))
}

/// Review list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<ReviewsTemplate> {
    let book = state.reviews().list().await?;
    Ok(ReviewsTemplate {
        reviews: ReviewsView::new(&book, None),
    })
}

/// Add a review.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ReviewForm>,
) -> Result<ReviewsTemplate> {
    let review = parse_review(&form.name, &form.rating, &form.text)?;
    let rating = review.rating.to_string();
    let book = state.reviews().add(review).await?;
    add_breadcrumb("reviews", "Added review", &[("rating", &rating)]);
    tracing::info!(count = book.len(), "Review added");

    Ok(ReviewsTemplate {
        reviews: ReviewsView::new(&book, Some(Notice::success("Thank you for your review!"))),
    })
}

/// Delete the first review matching the submitted name, rating and text.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteReviewForm>,
) -> Result<ReviewsTemplate> {
    if !form.confirmed {
        return Err(AppError::BadRequest(
            "Please confirm that you want to delete this review.".to_string(),
        ));
    }

    let review = parse_review(&form.name, &form.rating, &form.text)?;
    let (book, removed) = state.reviews().remove(&review).await?;
    tracing::info!(removed, count = book.len(), "Review delete requested");

    let notice = (!removed).then(|| Notice::info("That review was already removed."));
    Ok(ReviewsTemplate {
        reviews: ReviewsView::new(&book, notice),
    })
}
