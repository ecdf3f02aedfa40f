//! Staff login form validation.
//!
//! The back office is gated by a simple form: a name, a staff email on the
//! organisation's domain and a password of minimum strength. Every field is
//! checked so the form can flag all failing inputs at once.

use serde::{Deserialize, Serialize};

use crate::{Email, EmailError};

/// Minimum characters in a staff name.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum characters in a staff password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Default staff email domain.
pub const DEFAULT_STAFF_DOMAIN: &str = "metropolia.fi";

/// A single field failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("email must end with @{domain}")]
    WrongDomain { domain: String },
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password must contain an uppercase letter")]
    PasswordMissingUppercase,
    #[error("password must contain a number")]
    PasswordMissingDigit,
}

/// Per-field failures of one submission. At least one field is set.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("staff login rejected")]
pub struct LoginErrors {
    pub name: Option<LoginError>,
    pub email: Option<LoginError>,
    pub password: Option<LoginError>,
}

impl LoginErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// A staff member who passed the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    pub name: String,
    pub email: Email,
}

fn check_name(name: &str) -> Result<String, LoginError> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err(LoginError::NameTooShort { min: MIN_NAME_LEN });
    }
    Ok(name.to_string())
}

fn check_email(email: &str, domain: &str) -> Result<Email, LoginError> {
    let email = Email::parse(email)?;
    if !email.has_domain(domain) {
        return Err(LoginError::WrongDomain {
            domain: domain.trim_start_matches('@').to_string(),
        });
    }
    Ok(email)
}

fn check_password(password: &str) -> Result<(), LoginError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoginError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(LoginError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(LoginError::PasswordMissingDigit);
    }
    Ok(())
}

/// Validate a staff login submission against `domain`.
///
/// # Errors
///
/// Returns [`LoginErrors`] with every failing field filled in.
pub fn validate_staff_login(
    name: &str,
    email: &str,
    password: &str,
    domain: &str,
) -> Result<StaffIdentity, LoginErrors> {
    let name = check_name(name);
    let email = check_email(email, domain);
    let password = check_password(password);

    match (name, email, password) {
        (Ok(name), Ok(email), Ok(())) => Ok(StaffIdentity { name, email }),
        (name, email, password) => Err(LoginErrors {
            name: name.err(),
            email: email.err(),
            password: password.err(),
        }),
    }
}
