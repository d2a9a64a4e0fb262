//! Admin login route handlers.
//!
//! Same credential flow as the public login, but an account without an
//! admin role is signed straight back out instead of being let onto the
//! site half-elevated.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::set_sentry_user;
use crate::filters;
use crate::middleware::auth::{set_current_user, sign_out};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Admin login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
}

/// Display the admin login page.
#[instrument]
pub async fn login_page() -> impl IntoResponse {
    AdminLoginTemplate { error: None }
}

/// Handle an admin login submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AdminLoginForm>,
) -> Response {
    let service = AuthService::new(state.pool());

    match service.login(&form.email, &form.password).await {
        Ok(profile) if profile.role.is_admin() => {
            let current = CurrentUser::from(&profile);
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!("failed to store session: {e}");
                return error_page("Something went wrong. Please try again.");
            }

            set_sentry_user(&profile.id, Some(profile.email.as_str()));
            Redirect::to("/admin").into_response()
        }
        Ok(profile) => {
            // Valid credentials, wrong role: refuse and drop the session.
            tracing::warn!(user_id = %profile.id, "non-admin attempted admin login");
            sign_out(&session).await;
            error_page("You do not have permission to access the admin panel.")
        }
        Err(AuthError::MissingProfile) => {
            sign_out(&session).await;
            error_page(
                "Your account is missing its profile. You have been signed out; please contact support.",
            )
        }
        Err(e) => {
            tracing::warn!("admin login failed: {e}");
            error_page(&crate::error::AppError::Auth(e).user_message())
        }
    }
}

fn error_page(message: &str) -> Response {
    AdminLoginTemplate {
        error: Some(message.to_string()),
    }
    .into_response()
}
