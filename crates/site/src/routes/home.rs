//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::{CarouselRepository, ServiceRepository};
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{CarouselImage, Service};
use crate::state::AppState;

use super::NavView;

/// A carousel slide for the home page.
#[derive(Clone)]
pub struct CarouselView {
    pub image_url: String,
    pub alt_text: String,
}

impl From<&CarouselImage> for CarouselView {
    fn from(image: &CarouselImage) -> Self {
        Self {
            image_url: image.image_url.clone(),
            alt_text: image.alt_text.clone(),
        }
    }
}

/// A service card for the home page preview grid.
#[derive(Clone)]
pub struct ServiceCardView {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
}

impl From<&Service> for ServiceCardView {
    fn from(service: &Service) -> Self {
        Self {
            title: service.title.clone(),
            description: service.description.clone(),
            category: service.category.clone(),
            image_url: service.image_url.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    /// Carousel slides in rotation order.
    pub carousel: Vec<CarouselView>,
    /// Service cards for the preview grid.
    pub services: Vec<ServiceCardView>,
}

/// Display the home page.
///
/// A failed fetch renders the page with that section empty; the home page
/// never errors out over missing content.
#[instrument(skip(state, user))]
pub async fn home(State(state): State<AppState>, user: OptionalUser) -> impl IntoResponse {
    let carousel = CarouselRepository::new(state.pool())
        .list_all()
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch carousel images: {e}");
                Vec::new()
            },
            |images| images.iter().map(CarouselView::from).collect(),
        );

    let services = ServiceRepository::new(state.pool())
        .list_all()
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch services: {e}");
                Vec::new()
            },
            |services| services.iter().map(ServiceCardView::from).collect(),
        );

    HomeTemplate {
        nav: NavView::from(&user),
        carousel,
        services,
    }
}
