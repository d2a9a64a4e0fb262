//! Domain types for the site.

pub mod carousel;
pub mod profile;
pub mod service;
pub mod session;
pub mod software;

pub use carousel::CarouselImage;
pub use profile::Profile;
pub use service::Service;
pub use session::{CurrentUser, session_keys};
pub use software::SoftwareProduct;

// Re-export the role enum from core for convenience
pub use iq_geospatial_core::UserRole;
