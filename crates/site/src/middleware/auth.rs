//! Authentication extractors.
//!
//! Route handlers declare their access requirement through an extractor;
//! the session holds the signed-in identity. HTML requests are redirected
//! to the appropriate login page, API requests get a bare 401.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn account(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Error returned when authentication is required but the user is not signed in.
pub enum AuthRejection {
    /// Redirect to a login page (for HTML requests).
    RedirectToLogin(&'static str),
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Forbidden - signed in but without the required role.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(target) => Redirect::to(target).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only administrators can access this resource",
            )
                .into_response(),
        }
    }
}

/// Read the current user out of the request's session, if any.
async fn current_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await.ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin("/login")
            }
        })?;

        Ok(Self(user))
    }
}

/// Extractor that requires an admin or superuser.
///
/// Anonymous HTML requests are redirected to `/admin/login`; signed-in
/// users without an admin role get 403.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await.ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin("/admin/login")
            }
        })?;

        if !user.role.is_admin() {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireUser`, this never rejects the request; pages use it to
/// decide which navigation links to render.
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts).await))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Sign the user out, destroying all session state.
pub async fn sign_out(session: &Session) {
    if let Err(e) = session.flush().await {
        tracing::warn!("failed to destroy session on sign-out: {e}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use iq_geospatial_core::{Email, ProfileId, UserRole};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    async fn admin_page(RequireAdmin(user): RequireAdmin) -> String {
        format!("dashboard for {}", user.email)
    }

    fn test_router(role: Option<UserRole>) -> Router {
        let store = MemoryStore::default();
        let session_layer = SessionManagerLayer::new(store);

        let sign_in = move |session: Session| async move {
            if let Some(role) = role {
                let user = CurrentUser {
                    id: ProfileId::generate(),
                    email: Email::parse("admin@iqgeospatial.com").unwrap(),
                    role,
                };
                set_current_user(&session, &user).await.unwrap();
            }
            "ok"
        };

        Router::new()
            .route("/test/sign-in", get(sign_in))
            .route("/admin", get(admin_page))
            .layer(session_layer)
    }

    async fn session_cookie(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/test/sign-in")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(axum::http::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_signed_out_admin_request_redirects_to_admin_login() {
        let router = test_router(None);

        let response = router
            .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(axum::http::header::LOCATION).unwrap(),
            "/admin/login"
        );
    }

    #[tokio::test]
    async fn test_regular_user_is_forbidden_from_admin() {
        let router = test_router(Some(UserRole::User));
        let cookie = session_cookie(&router).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/admin")
                    .header(axum::http::header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_reaches_dashboard() {
        let router = test_router(Some(UserRole::Admin));
        let cookie = session_cookie(&router).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/admin")
                    .header(axum::http::header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_superuser_reaches_dashboard() {
        let router = test_router(Some(UserRole::Superuser));
        let cookie = session_cookie(&router).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/admin")
                    .header(axum::http::header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
