//! User management commands.
//!
//! Creation goes through the same registration path as the web form, so
//! the profile row is provisioned in the same transaction and the password
//! hashing matches.

use std::str::FromStr;

use iq_geospatial_core::{Email, UserRole};
use iq_geospatial_site::db::ProfileRepository;
use iq_geospatial_site::db::create_pool;
use iq_geospatial_site::services::auth::hash_password;

use super::{CommandError, database_url};

/// Create a user with the given role.
///
/// # Errors
///
/// Returns an error if the inputs are invalid, the email is taken, or the
/// database is unreachable.
pub async fn create(email: &str, password: &str, role: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(e.to_string()))?;
    let role = UserRole::from_str(role).map_err(CommandError::Invalid)?;

    if password.len() < 8 {
        return Err(CommandError::Invalid(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash =
        hash_password(password).map_err(|e| CommandError::Invalid(e.to_string()))?;

    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;
    let repo = ProfileRepository::new(&pool);

    let profile = repo
        .create_with_password(&email, &password_hash)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    // Registration always provisions the `user` role; elevate afterwards.
    let profile = if role == UserRole::User {
        profile
    } else {
        repo.update_role(profile.id, role)
            .await
            .map_err(|e| CommandError::Invalid(e.to_string()))?
    };

    tracing::info!(user_id = %profile.id, role = %profile.role, "user created");
    Ok(())
}

/// Update an existing user's role.
///
/// # Errors
///
/// Returns an error if the role is invalid or the user doesn't exist.
pub async fn set_role(email: &str, role: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(e.to_string()))?;
    let role = UserRole::from_str(role).map_err(CommandError::Invalid)?;

    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;
    let repo = ProfileRepository::new(&pool);

    let profile = repo
        .get_by_email(&email)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?
        .ok_or_else(|| CommandError::Invalid(format!("no user with email {email}")))?;

    let updated = repo
        .update_role(profile.id, role)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    tracing::info!(user_id = %updated.id, role = %updated.role, "role updated");
    Ok(())
}
