//! User management routes.
//!
//! Listing goes through the users-join rather than a bare profile read;
//! role updates and deletions are the two administrative operations. The
//! one rule enforced here rather than in the database: an admin can never
//! delete their own account.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use iq_geospatial_core::{ProfileId, UserRole};

use crate::db::ProfileRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, take_flash};
use crate::models::Profile;
use crate::state::AppState;

use super::super::AdminUserView;
use super::flash_outcome;

/// A user row in the management table.
pub struct UserRowView {
    pub id: String,
    pub email: String,
    pub role: String,
    pub registered_on: String,
    /// Disables the delete button for the signed-in admin's own row.
    pub is_self: bool,
}

impl UserRowView {
    fn new(profile: &Profile, current_admin: ProfileId) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email.to_string(),
            role: profile.role.to_string(),
            registered_on: profile.created_at.format("%Y-%m-%d").to_string(),
            is_self: profile.id == current_admin,
        }
    }
}

/// User management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub admin_user: AdminUserView,
    pub flash: Option<String>,
    pub users: Vec<UserRowView>,
}

/// Role update form data.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Reject a delete aimed at the signed-in admin themselves.
///
/// # Errors
///
/// Returns the message to show the admin.
fn ensure_not_self(target: ProfileId, current_admin: ProfileId) -> Result<(), String> {
    if target == current_admin {
        return Err("You cannot delete your own administrator account.".to_string());
    }
    Ok(())
}

/// List all users.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let profiles = ProfileRepository::new(state.pool())
        .list_all_with_profiles()
        .await?;

    let users = profiles
        .iter()
        .map(|p| UserRowView::new(p, admin.id))
        .collect();

    Ok(UsersTemplate {
        admin_user: AdminUserView::from(&admin),
        flash: take_flash(&session).await,
        users,
    })
}

/// Update a user's role.
///
/// POST /admin/users/{id}/role
///
/// The submitted value must parse as one of the three enumerated roles;
/// anything else is rejected before the persistence call is made.
#[instrument(skip(_admin, state, session, form))]
pub async fn update_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Form(form): Form<RoleForm>,
) -> Redirect {
    let result = update_role_inner(&state, ProfileId::new(id), &form.role).await;
    flash_outcome(&session, result, "/admin/users").await
}

async fn update_role_inner(
    state: &AppState,
    id: ProfileId,
    role: &str,
) -> Result<String, AppError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| AppError::Validation("Please select a valid role.".to_string()))?;

    let profile = ProfileRepository::new(state.pool())
        .update_role(id, role)
        .await?;

    tracing::info!(user_id = %profile.id, role = %profile.role, "role updated");
    Ok("Role updated successfully!".to_string())
}

/// Delete a user.
///
/// POST /admin/users/{id}/delete
///
/// Self-deletion is blocked before any query is issued.
#[instrument(skip(admin, state, session))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Redirect {
    let result = delete_inner(&state, ProfileId::new(id), admin.id).await;
    flash_outcome(&session, result, "/admin/users").await
}

async fn delete_inner(
    state: &AppState,
    id: ProfileId,
    current_admin: ProfileId,
) -> Result<String, AppError> {
    ensure_not_self(id, current_admin).map_err(AppError::Validation)?;

    ProfileRepository::new(state.pool()).delete_by_id(id).await?;

    tracing::info!(user_id = %id, "user deleted");
    Ok("User deleted successfully.".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_rejects_own_account() {
        let admin = ProfileId::generate();
        let err = ensure_not_self(admin, admin).unwrap_err();
        assert_eq!(err, "You cannot delete your own administrator account.");
    }

    #[test]
    fn test_delete_allows_other_accounts() {
        let admin = ProfileId::generate();
        let other = ProfileId::generate();
        assert!(ensure_not_self(other, admin).is_ok());
    }

    #[test]
    fn test_role_form_values_must_parse() {
        // The same parse gate the handler uses
        assert!("superuser".parse::<UserRole>().is_ok());
        assert!("moderator".parse::<UserRole>().is_err());
    }
}
