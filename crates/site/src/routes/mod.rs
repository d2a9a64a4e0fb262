//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (carousel + service cards)
//! GET  /health                 - Health check
//!
//! # Public content
//! GET  /services               - Services offered
//! GET  /software               - Software catalog
//! GET  /about                  - About the company
//! GET  /contact                - Contact page
//! POST /contact                - Contact form (acknowledgement only)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Chat relay (bearer token)
//! POST /api/chat               - Forward a conversation to the completion API
//!
//! # Admin (role-gated)
//! GET  /admin                  - Dashboard overview
//! GET  /admin/login            - Admin login page
//! POST /admin/login            - Admin login action
//! GET  /admin/users            - User management
//! POST /admin/users/{id}/role   - Update a user's role
//! POST /admin/users/{id}/delete - Delete a user
//! GET  /admin/services          - Service management
//! GET  /admin/services/{id}/edit - Service management with edit form
//! POST /admin/services          - Create service (multipart)
//! POST /admin/services/{id}     - Update service (multipart)
//! POST /admin/services/{id}/delete - Delete service + its image
//! GET  /admin/software          - Software management
//! GET  /admin/software/{id}/edit - Software management with edit form
//! POST /admin/software          - Create software (multipart)
//! POST /admin/software/{id}     - Update software (multipart)
//! POST /admin/software/{id}/delete - Delete software + its files
//! GET  /admin/content           - Carousel management
//! POST /admin/content           - Add carousel image (multipart)
//! POST /admin/content/{id}/delete - Delete carousel image + its file
//! ```

pub mod admin;
pub mod api;
pub mod auth;
pub mod home;
pub mod pages;
pub mod services;
pub mod software;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::OptionalUser;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Navigation state shared by every page template.
#[derive(Debug, Clone, Default)]
pub struct NavView {
    pub signed_in: bool,
    pub is_admin: bool,
}

impl From<&OptionalUser> for NavView {
    fn from(user: &OptionalUser) -> Self {
        user.0.as_ref().map_or_else(Self::default, |u| Self {
            signed_in: true,
            is_admin: u.role.is_admin(),
        })
    }
}

/// Admin identity shown in the admin layout.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub email: String,
    pub is_superuser: bool,
}

impl From<&CurrentUser> for AdminUserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            email: user.email.to_string(),
            is_superuser: user.role == iq_geospatial_core::UserRole::Superuser,
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Public content pages
        .route("/services", get(services::index))
        .route("/software", get(software::index))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact).post(pages::contact_submit))
        // Auth routes
        .merge(auth_routes())
        // Chat relay
        .nest("/api", api::routes())
        // Admin panel
        .nest("/admin", admin::routes())
}
