//! Session-related types for staff authentication.

use serde::{Deserialize, Serialize};
use your_slice_core::Email;
use your_slice_core::credentials::StaffIdentity;

/// Session-stored staff identity.
///
/// Minimal data stored in the session to identify the logged-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// Display name as typed on the login form (trimmed).
    pub name: String,
    pub email: Email,
}

impl From<StaffIdentity> for CurrentStaff {
    fn from(identity: StaffIdentity) -> Self {
        Self {
            name: identity.name,
            email: identity.email,
        }
    }
}

/// Session keys for staff authentication data.
pub mod keys {
    /// Key for storing the current logged-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";
}
