//! Homepage carousel management routes.
//!
//! Add/remove only; slides rotate on the home page in creation order.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;
use tracing::instrument;

use iq_geospatial_core::CarouselImageId;

use crate::db::CarouselRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, take_flash};
use crate::models::CarouselImage;
use crate::state::AppState;
use crate::storage::{CAROUSEL_PREFIX, unique_object_name};

use super::super::AdminUserView;
use super::flash_outcome;
use super::forms::{AdminForm, validate_carousel_form};

/// Fallback alt text when the admin leaves the field empty.
const DEFAULT_ALT_TEXT: &str = "Carousel image";

/// A carousel image in the management grid.
pub struct CarouselRowView {
    pub id: String,
    pub image_url: String,
    pub alt_text: String,
}

impl From<&CarouselImage> for CarouselRowView {
    fn from(image: &CarouselImage) -> Self {
        Self {
            id: image.id.to_string(),
            image_url: image.image_url.clone(),
            alt_text: image.alt_text.clone(),
        }
    }
}

/// Carousel management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/carousel.html")]
pub struct AdminCarouselTemplate {
    pub admin_user: AdminUserView,
    pub flash: Option<String>,
    pub images: Vec<CarouselRowView>,
}

/// List carousel images with the upload form.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let images = CarouselRepository::new(state.pool()).list_all().await?;

    Ok(AdminCarouselTemplate {
        admin_user: AdminUserView::from(&admin),
        flash: take_flash(&session).await,
        images: images.iter().map(CarouselRowView::from).collect(),
    })
}

/// Add a carousel image.
///
/// POST /admin/content (multipart)
#[instrument(skip(_admin, state, session, multipart))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Redirect {
    let result = create_inner(&state, multipart).await;
    flash_outcome(&session, result, "/admin/content").await
}

async fn create_inner(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let form = AdminForm::from_multipart(multipart).await?;

    let image = form.file("image");
    validate_carousel_form(image.is_some()).map_err(AppError::Validation)?;

    let file = image.ok_or_else(|| AppError::Validation("Please select an image file.".into()))?;
    let path = unique_object_name(CAROUSEL_PREFIX, &file.filename);
    let url = state
        .storage()
        .upload(&path, &file.content_type, file.bytes.clone())
        .await?;

    let alt_text = form.optional_text("alt_text").unwrap_or(DEFAULT_ALT_TEXT);

    CarouselRepository::new(state.pool())
        .create(&url, alt_text)
        .await?;

    Ok("Image added to the carousel!".to_string())
}

/// Delete a carousel image and its file.
///
/// POST /admin/content/{id}/delete
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Redirect {
    let result = delete_inner(&state, CarouselImageId::new(id)).await;
    flash_outcome(&session, result, "/admin/content").await
}

async fn delete_inner(state: &AppState, id: CarouselImageId) -> Result<String, AppError> {
    let repo = CarouselRepository::new(state.pool());
    let image = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("carousel image {id}")))?;

    let failures = state.storage().remove_urls(&[&image.image_url]).await;

    repo.delete(id).await?;

    if failures.is_empty() {
        Ok("Carousel image deleted.".to_string())
    } else {
        Ok("Carousel image deleted, but its file could not be removed from storage.".to_string())
    }
}
