//! Authentication extractors for the back office.
//!
//! Every page except the login form requires a staff member in the session.

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentStaff, session_keys};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Extractor that requires a logged-in staff member.
///
/// Plain page loads are redirected to the login form. HTMX requests get a
/// 401 with `HX-Redirect` so the whole page navigates instead of swapping a
/// login form into a table.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireStaff(staff): RequireStaff) -> String {
///     format!("Hello, {}!", staff.name)
/// }
/// ```
pub struct RequireStaff(pub CurrentStaff);

/// Rejection for [`RequireStaff`].
#[derive(Debug)]
pub enum StaffAuthRejection {
    /// Redirect to the login page (for page loads).
    RedirectToLogin,
    /// 401 with an HTMX redirect header (for fragment requests).
    HtmxRedirect,
}

impl IntoResponse for StaffAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::HtmxRedirect => (
                StatusCode::UNAUTHORIZED,
                [(
                    HeaderName::from_static("hx-redirect"),
                    HeaderValue::from_static(LOGIN_PATH),
                )],
            )
                .into_response(),
        }
    }
}

fn is_htmx(parts: &Parts) -> bool {
    parts
        .headers
        .get("hx-request")
        .is_some_and(|v| v.as_bytes() == b"true")
}

async fn current_staff(parts: &Parts) -> Option<CurrentStaff> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read staff identity from session");
            None
        })
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = StaffAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match current_staff(parts).await {
            Some(staff) => Ok(Self(staff)),
            None if is_htmx(parts) => Err(StaffAuthRejection::HtmxRedirect),
            None => Err(StaffAuthRejection::RedirectToLogin),
        }
    }
}

/// Extractor that optionally gets the current staff member.
///
/// Used by the login page to skip the form when already signed in.
pub struct OptionalStaff(pub Option<CurrentStaff>);

impl<S> FromRequestParts<S> for OptionalStaff
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_staff(parts).await))
    }
}

/// Store the staff member in the session.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Forget the staff member (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be flushed.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
