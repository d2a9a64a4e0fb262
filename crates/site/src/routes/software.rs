//! Public software catalog page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::SoftwareRepository;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::SoftwareProduct;
use crate::state::AppState;

use super::NavView;

/// A software product card.
#[derive(Clone)]
pub struct SoftwareCardView {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub installer_url: Option<String>,
    pub documentation_url: Option<String>,
}

impl From<&SoftwareProduct> for SoftwareCardView {
    fn from(product: &SoftwareProduct) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            video_url: product.video_url.clone(),
            installer_url: product.installer_url.clone(),
            documentation_url: product.documentation_url.clone(),
        }
    }
}

/// Software page template.
#[derive(Template, WebTemplate)]
#[template(path = "software.html")]
pub struct SoftwareTemplate {
    pub nav: NavView,
    pub products: Vec<SoftwareCardView>,
}

/// Display the software catalog.
#[instrument(skip(state, user))]
pub async fn index(State(state): State<AppState>, user: OptionalUser) -> impl IntoResponse {
    let products = SoftwareRepository::new(state.pool())
        .list_all()
        .await
        .map_or_else(
            |e| {
                tracing::error!("Failed to fetch software products: {e}");
                Vec::new()
            },
            |products| products.iter().map(SoftwareCardView::from).collect(),
        );

    SoftwareTemplate {
        nav: NavView::from(&user),
        products,
    }
}
