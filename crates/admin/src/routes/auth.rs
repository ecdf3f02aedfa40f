//! Authentication route handlers for the back office.
//!
//! Staff sign in with a name, an email on the staff domain and a password
//! of minimum strength. Each failing field is reported next to its input.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use your_slice_core::credentials::{LoginError, LoginErrors, validate_staff_login};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalStaff, clear_current_staff, set_current_staff};
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub domain: String,
    /// Name and email are echoed back; the password never is.
    pub name: String,
    pub email: String,
    pub name_error: String,
    pub email_error: String,
    pub password_error: String,
}

impl LoginPageTemplate {
    fn blank(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            name: String::new(),
            email: String::new(),
            name_error: String::new(),
            email_error: String::new(),
            password_error: String::new(),
        }
    }

    fn rejected(domain: &str, form: &LoginForm, errors: &LoginErrors) -> Self {
        let message = |e: &Option<LoginError>| e.as_ref().map(field_message).unwrap_or_default();
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            name_error: message(&errors.name),
            email_error: message(&errors.email),
            password_error: message(&errors.password),
            ..Self::blank(domain)
        }
    }
}

/// Staff-facing wording for a failed field.
fn field_message(error: &LoginError) -> String {
    match error {
        LoginError::NameTooShort { min } => format!("Name must be at least {min} characters."),
        LoginError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
        LoginError::WrongDomain { domain } => format!("Email must end with @{domain}."),
        LoginError::PasswordTooShort { min } => {
            format!("Password must be at least {min} characters.")
        }
        LoginError::PasswordMissingUppercase => {
            "Password must contain at least one uppercase letter.".to_string()
        }
        LoginError::PasswordMissingDigit => "Password must contain at least one number.".to_string(),
    }
}

/// Login form data.
///
/// `Debug` is implemented by hand so the password never reaches the logs.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page, or go straight to the dashboard when signed in.
///
/// GET /auth/login
#[instrument(skip(state, staff))]
async fn login_page(State(state): State<AppState>, OptionalStaff(staff): OptionalStaff) -> Response {
    if staff.is_some() {
        return Redirect::to("/").into_response();
    }
    LoginPageTemplate::blank(&state.config().staff_email_domain).into_response()
}

/// Check the form and sign the staff member in.
///
/// POST /auth/login
#[instrument(skip(state, session))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let domain = &state.config().staff_email_domain;

    match validate_staff_login(&form.name, &form.email, &form.password, domain) {
        Ok(identity) => {
            let staff = CurrentStaff::from(identity);
            set_current_staff(&session, &staff).await?;
            set_sentry_user(staff.email.as_str());
            tracing::info!(staff = %staff.email, "Staff signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            tracing::info!(
                name = errors.name.is_some(),
                email = errors.email.is_some(),
                password = errors.password.is_some(),
                "Staff login rejected"
            );
            Ok((
                StatusCode::BAD_REQUEST,
                LoginPageTemplate::rejected(domain, &form, &errors),
            )
                .into_response())
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
#[instrument(skip(session))]
async fn logout(session: Session) -> Result<Redirect> {
    clear_current_staff(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/auth/login"))
}
