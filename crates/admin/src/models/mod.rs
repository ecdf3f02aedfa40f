//! Session models for the back office.

pub mod session;

pub use session::{CurrentStaff, keys as session_keys};
