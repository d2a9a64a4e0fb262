//! Admin dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{ProfileRepository, ServiceRepository, SoftwareRepository};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::middleware::auth::sign_out;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::state::AppState;

use super::super::AdminUserView;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    /// Combined error banner for partially failed fetches.
    pub error: Option<String>,
    pub user_count: usize,
    pub service_count: usize,
    pub software_count: usize,
}

/// Dashboard page handler.
///
/// Re-resolves the signed-in profile first: a session whose profile row is
/// gone is force-signed-out rather than shown stale admin data. The three
/// list fetches run concurrently; each result is evaluated on its own, so
/// one failing table doesn't blank the other two - failures are combined
/// into a single banner.
#[instrument(skip(admin, state, session))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let auth = AuthService::new(state.pool());
    match auth.resolve_profile(admin.id).await {
        Ok(_) => {}
        Err(AuthError::MissingProfile) => {
            tracing::warn!(user_id = %admin.id, "session without profile row, forcing sign-out");
            sign_out(&session).await;
            return Redirect::to("/admin/login").into_response();
        }
        Err(e) => {
            tracing::error!("failed to re-resolve profile: {e}");
        }
    }

    let profiles = ProfileRepository::new(state.pool());
    let services = ServiceRepository::new(state.pool());
    let software = SoftwareRepository::new(state.pool());

    let (users_result, services_result, software_result) = tokio::join!(
        profiles.list_all_with_profiles(),
        services.list_all(),
        software.list_all(),
    );

    let mut error_messages = Vec::new();

    let user_count = match users_result {
        Ok(users) => users.len(),
        Err(e) => {
            tracing::error!("Failed to fetch users: {e}");
            error_messages.push("Users could not be loaded".to_string());
            0
        }
    };

    let service_count = match services_result {
        Ok(services) => services.len(),
        Err(e) => {
            tracing::error!("Failed to fetch services: {e}");
            error_messages.push("Services could not be loaded".to_string());
            0
        }
    };

    let software_count = match software_result {
        Ok(software) => software.len(),
        Err(e) => {
            tracing::error!("Failed to fetch software: {e}");
            error_messages.push("Software could not be loaded".to_string());
            0
        }
    };

    let error = if error_messages.is_empty() {
        None
    } else {
        Some(format!(
            "Some panel data failed to load: {}.",
            error_messages.join("; ")
        ))
    };

    DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        error,
        user_count,
        service_count,
        software_count,
    }
    .into_response()
}
