//! HTTP middleware: sessions, flash messages, auth extractors.

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin, RequireUser};
pub use flash::{set_flash, take_flash};
pub use session::create_session_layer;
