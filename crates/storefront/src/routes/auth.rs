//! Customer login and signup dialogs.
//!
//! These are demo forms: there is no account store. A well-formed email and
//! a non-empty password are accepted, and the email is remembered in the
//! session for the greeting in the header.

use axum::{
    Form,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use your_slice_core::Email;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::CurrentCustomer;
use crate::views::{Notice, NoticeTemplate};

/// Notice after a successful login.
pub const LOGIN_NOTICE: &str = "Login successful! Welcome back.";

/// Notice after a successful signup.
pub const SIGNUP_NOTICE: &str = "Account created successfully! Welcome to Your Slice.";

/// HTMX event fired when the customer logs in or out.
pub const AUTH_CHANGED: &str = "auth-changed";

/// Login and signup form data.
///
/// `Debug` is implemented by hand so the password never reaches the logs.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CredentialsForm {
    fn validate(&self) -> Result<Email> {
        let email = Email::parse(&self.email)
            .map_err(|_| AppError::BadRequest("Please enter a valid email address.".to_string()))?;
        if self.password.is_empty() {
            return Err(AppError::BadRequest("Please enter your password.".to_string()));
        }
        Ok(email)
    }
}

fn auth_changed(message: &str) -> Response {
    (
        [(
            HeaderName::from_static("hx-trigger"),
            HeaderValue::from_static(AUTH_CHANGED),
        )],
        NoticeTemplate {
            notice: Notice::success(message),
        },
    )
        .into_response()
}

async fn remember(session: &Session, email: Email) -> Result<()> {
    add_breadcrumb("auth", "Customer signed in", &[("domain", email.domain())]);
    set_current_customer(session, &CurrentCustomer { email }).await?;
    Ok(())
}

/// Login dialog submit.
#[instrument(skip(session))]
pub async fn login(session: Session, Form(form): Form<CredentialsForm>) -> Result<Response> {
    let email = form.validate()?;
    remember(&session, email).await?;
    tracing::info!("Customer logged in");
    Ok(auth_changed(LOGIN_NOTICE))
}

/// Signup dialog submit.
#[instrument(skip(session))]
pub async fn signup(session: Session, Form(form): Form<CredentialsForm>) -> Result<Response> {
    let email = form.validate()?;
    remember(&session, email).await?;
    tracing::info!("Customer signed up");
    Ok(auth_changed(SIGNUP_NOTICE))
}

/// Forget the customer.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_customer(&session).await?;
    Ok(auth_changed("You have been logged out."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str) -> CredentialsForm {
        CredentialsForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(form("aino@example.fi", "pizza").validate().is_ok());
        assert!(matches!(form("aino", "pizza").validate(), Err(AppError::BadRequest(_))));
        assert!(matches!(form("aino@example.fi", "").validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", form("aino@example.fi", "hunter2"));
        assert!(rendered.contains("aino@example.fi"));
        assert!(!rendered.contains("hunter2"));
    }
}
