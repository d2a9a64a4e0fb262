//! Profile domain type.

use chrono::{DateTime, Utc};

use iq_geospatial_core::{Email, ProfileId, UserRole};

/// A user profile (domain type).
///
/// One-to-one with the authentication record; provisioned automatically in
/// the registration transaction, never inserted by a handler directly.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Shared ID of the user and their profile.
    pub id: ProfileId,
    /// The user's email address.
    pub email: Email,
    /// The user's role.
    pub role: UserRole,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}
