//! Public services page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::ServiceRepository;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::state::AppState;

use super::NavView;
use super::home::ServiceCardView;

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub nav: NavView,
    pub services: Vec<ServiceCardView>,
}

/// Display the services page.
#[instrument(skip(state, user))]
pub async fn index(State(state): State<AppState>, user: OptionalUser) -> impl IntoResponse {
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

    ServicesTemplate {
        nav: NavView::from(&user),
        services,
    }
}
