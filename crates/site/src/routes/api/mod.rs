//! JSON API routes.

pub mod chat;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat::relay))
}
