//! Session-related types for authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use iq_geospatial_core::{Email, ProfileId, UserRole};

use super::profile::Profile;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The user's database ID.
    pub id: ProfileId,
    /// The user's email address.
    pub email: Email,
    /// The user's role at sign-in time.
    pub role: UserRole,
}

impl From<&Profile> for CurrentUser {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for one-shot flash messages (consumed on next render).
    pub const FLASH: &str = "flash";
}
