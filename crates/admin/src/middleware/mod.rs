//! HTTP middleware for the back office.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (no framing, strict CSP)
//! 4. Session layer (tower-sessions with an in-memory store)
//!
//! Authentication is enforced per handler with the [`RequireStaff`] extractor.

pub mod auth;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalStaff, RequireStaff, clear_current_staff, set_current_staff};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
