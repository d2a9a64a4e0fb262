//! Login, registration and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalUser, auth, set_flash, take_flash};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::state::AppState;

use super::NavView;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavView,
    pub flash: Option<String>,
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: NavView,
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Register form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Display the login page.
#[instrument(skip(session, user))]
pub async fn login_page(session: Session, user: OptionalUser) -> impl IntoResponse {
    LoginTemplate {
        nav: NavView::from(&user),
        flash: take_flash(&session).await,
        error: None,
    }
}

/// Handle a login submission.
///
/// Admins and superusers land on the dashboard; everyone else goes home.
/// An authenticated account with no profile row is the critical
/// half-provisioned state: the session is destroyed instead of letting the
/// app run half-authenticated.
#[instrument(skip(state, session, user, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    user: OptionalUser,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AuthService::new(state.pool());

    match service.login(&form.email, &form.password).await {
        Ok(profile) => {
            let current = CurrentUser::from(&profile);
            if let Err(e) = auth::set_current_user(&session, &current).await {
                tracing::error!("failed to store session: {e}");
                return login_error(&user, "Something went wrong. Please try again.").await;
            }

            set_sentry_user(&profile.id, Some(profile.email.as_str()));

            if profile.role.is_admin() {
                Redirect::to("/admin").into_response()
            } else {
                Redirect::to("/").into_response()
            }
        }
        Err(AuthError::MissingProfile) => {
            // Forced sign-out: never run half-authenticated.
            auth::sign_out(&session).await;
            login_error(
                &user,
                "Your account is missing its profile. You have been signed out; please contact support.",
            )
            .await
        }
        Err(e) => {
            tracing::warn!("login failed: {e}");
            login_error(&user, &crate::error::AppError::Auth(e).user_message()).await
        }
    }
}

async fn login_error(user: &OptionalUser, message: &str) -> Response {
    LoginTemplate {
        nav: NavView::from(user),
        flash: None,
        error: Some(message.to_string()),
    }
    .into_response()
}

/// Display the register page.
#[instrument(skip(user))]
pub async fn register_page(user: OptionalUser) -> impl IntoResponse {
    RegisterTemplate {
        nav: NavView::from(&user),
        error: None,
    }
}

/// Handle a registration submission.
///
/// The profile row is provisioned automatically inside the registration
/// transaction; on success the visitor is sent to the login page.
#[instrument(skip(state, session, user, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    user: OptionalUser,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.confirm_password {
        return RegisterTemplate {
            nav: NavView::from(&user),
            error: Some("Passwords do not match.".to_string()),
        }
        .into_response();
    }

    let service = AuthService::new(state.pool());

    match service.register(&form.email, &form.password).await {
        Ok(profile) => {
            tracing::info!(user_id = %profile.id, "user registered");
            set_flash(&session, "Registration successful! Please sign in.").await;
            Redirect::to("/login").into_response()
        }
        Err(e) => {
            tracing::warn!("registration failed: {e}");
            RegisterTemplate {
                nav: NavView::from(&user),
                error: Some(crate::error::AppError::Auth(e).user_message()),
            }
            .into_response()
        }
    }
}

/// Handle a logout submission.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    auth::sign_out(&session).await;
    clear_sentry_user();
    Redirect::to("/login")
}
