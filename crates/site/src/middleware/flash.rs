//! One-shot flash messages carried through the session.
//!
//! Mutation handlers redirect back to a page; the outcome message survives
//! exactly one render.

use tower_sessions::Session;

use crate::models::session_keys;

/// Store a flash message for the next render.
pub async fn set_flash(session: &Session, message: impl Into<String>) {
    if let Err(e) = session.insert(session_keys::FLASH, message.into()).await {
        tracing::warn!("failed to store flash message: {e}");
    }
}

/// Take the pending flash message, if any, clearing it.
pub async fn take_flash(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}
