//! Admin panel routes.
//!
//! Every handler is gated by [`RequireAdmin`](crate::middleware::RequireAdmin);
//! anonymous HTML requests bounce to `/admin/login`. Mutations follow one
//! shape: parse the form, validate before any remote call, upload files,
//! persist, flash the outcome, redirect back to the panel so the next
//! render refetches the list.

pub mod auth;
pub mod carousel;
pub mod dashboard;
pub mod forms;
pub mod services;
pub mod software;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::set_flash;
use crate::state::AppState;

/// Request body cap for admin uploads.
///
/// Slightly above the installer limit so the size check in the handler is
/// the one that rejects oversized installers with a useful message.
const MAX_UPLOAD_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::dashboard))
        // Admin login
        .route("/login", get(auth::login_page).post(auth::login))
        // Users
        .route("/users", get(users::index))
        .route("/users/{id}/role", post(users::update_role))
        .route("/users/{id}/delete", post(users::delete))
        // Services
        .route("/services", get(services::index).post(services::create))
        .route("/services/{id}/edit", get(services::edit))
        .route("/services/{id}", post(services::update))
        .route("/services/{id}/delete", post(services::delete))
        // Software
        .route("/software", get(software::index).post(software::create))
        .route("/software/{id}/edit", get(software::edit))
        .route("/software/{id}", post(software::update))
        .route("/software/{id}/delete", post(software::delete))
        // Carousel
        .route("/content", get(carousel::index).post(carousel::create))
        .route("/content/{id}/delete", post(carousel::delete))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
}

/// Flash a mutation outcome and bounce back to the panel.
///
/// Success carries its own message; failures flash the central user-facing
/// wording for the error kind.
pub(crate) async fn flash_outcome(
    session: &Session,
    result: Result<String, AppError>,
    back_to: &'static str,
) -> Redirect {
    match result {
        Ok(message) => set_flash(session, message).await,
        Err(e) => {
            tracing::error!("admin mutation failed: {e}");
            set_flash(session, e.user_message()).await;
        }
    }
    Redirect::to(back_to)
}
