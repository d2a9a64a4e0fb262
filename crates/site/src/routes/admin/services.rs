//! Service management routes.
//!
//! Create/edit/delete for the services shown on the public site, with the
//! card image stored under the `services/` prefix of the site bucket.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use iq_geospatial_core::ServiceId;

use crate::db::ServiceRepository;
use crate::db::services::ServiceChanges;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, set_flash, take_flash};
use crate::models::Service;
use crate::state::AppState;
use crate::storage::{SERVICES_PREFIX, unique_object_name};

use super::super::AdminUserView;
use super::flash_outcome;
use super::forms::{AdminForm, validate_service_form};

/// A service row in the management table.
pub struct ServiceRowView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
}

impl From<&Service> for ServiceRowView {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.to_string(),
            title: service.title.clone(),
            category: service.category.clone(),
            image_url: service.image_url.clone(),
        }
    }
}

/// Pre-filled values for the edit form.
pub struct ServiceFormView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
}

impl From<&Service> for ServiceFormView {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.to_string(),
            title: service.title.clone(),
            description: service.description.clone(),
            category: service.category.clone(),
        }
    }
}

/// Service management template.
///
/// Serves both the list+create view and the list+edit view; `editing`
/// switches the form between the two.
#[derive(Template, WebTemplate)]
#[template(path = "admin/services.html")]
pub struct AdminServicesTemplate {
    pub admin_user: AdminUserView,
    pub flash: Option<String>,
    pub services: Vec<ServiceRowView>,
    pub editing: Option<ServiceFormView>,
}

async fn render_panel(
    state: &AppState,
    admin_user: AdminUserView,
    session: &Session,
    editing: Option<ServiceFormView>,
) -> Result<AdminServicesTemplate, AppError> {
    let services = ServiceRepository::new(state.pool()).list_all().await?;

    Ok(AdminServicesTemplate {
        admin_user,
        flash: take_flash(session).await,
        services: services.iter().map(ServiceRowView::from).collect(),
        editing,
    })
}

/// List services with the create form.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    render_panel(&state, AdminUserView::from(&admin), &session, None).await
}

/// List services with the edit form pre-filled.
#[instrument(skip(admin, state, session))]
pub async fn edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let service = ServiceRepository::new(state.pool())
        .get_by_id(ServiceId::new(id))
        .await?;

    let Some(service) = service else {
        set_flash(&session, "That service no longer exists.").await;
        return Ok(Redirect::to("/admin/services").into_response());
    };

    let template = render_panel(
        &state,
        AdminUserView::from(&admin),
        &session,
        Some(ServiceFormView::from(&service)),
    )
    .await?;

    Ok(template.into_response())
}

/// Create a service.
///
/// POST /admin/services (multipart)
#[instrument(skip(_admin, state, session, multipart))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Redirect {
    let result = create_inner(&state, multipart).await;
    flash_outcome(&session, result, "/admin/services").await
}

async fn create_inner(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let form = AdminForm::from_multipart(multipart).await?;

    let title = form.text("title");
    let image = form.file("image");

    // Required fields are checked before any upload or query is issued.
    validate_service_form(title, image.is_some(), false).map_err(AppError::Validation)?;

    let mut image_url = None;
    if let Some(file) = image {
        let path = unique_object_name(SERVICES_PREFIX, &file.filename);
        let url = state
            .storage()
            .upload(&path, &file.content_type, file.bytes.clone())
            .await?;
        image_url = Some(url);
    }

    ServiceRepository::new(state.pool())
        .create(ServiceChanges {
            title,
            description: form.text("description"),
            category: form.text("category"),
            image_url: image_url.as_deref(),
        })
        .await?;

    Ok("Service added successfully!".to_string())
}

/// Update a service.
///
/// POST /admin/services/{id} (multipart)
///
/// An untouched file input keeps the existing image URL; a replacement
/// overwrites it.
#[instrument(skip(_admin, state, session, multipart))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Redirect {
    let result = update_inner(&state, ServiceId::new(id), multipart).await;
    flash_outcome(&session, result, "/admin/services").await
}

async fn update_inner(
    state: &AppState,
    id: ServiceId,
    multipart: Multipart,
) -> Result<String, AppError> {
    let repo = ServiceRepository::new(state.pool());
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    let form = AdminForm::from_multipart(multipart).await?;

    let title = form.text("title");
    let image = form.file("image");

    validate_service_form(title, image.is_some(), true).map_err(AppError::Validation)?;

    let mut image_url = existing.image_url.clone();
    if let Some(file) = image {
        let path = unique_object_name(SERVICES_PREFIX, &file.filename);
        let url = state
            .storage()
            .upload(&path, &file.content_type, file.bytes.clone())
            .await?;
        image_url = Some(url);
    }

    repo.update(
        id,
        ServiceChanges {
            title,
            description: form.text("description"),
            category: form.text("category"),
            image_url: image_url.as_deref(),
        },
    )
    .await?;

    Ok("Service updated successfully!".to_string())
}

/// Delete a service and its image.
///
/// POST /admin/services/{id}/delete
///
/// The image removal is attempted first and is best-effort; a failed
/// removal is surfaced in the flash message but never blocks the row
/// deletion.
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Redirect {
    let result = delete_inner(&state, ServiceId::new(id)).await;
    flash_outcome(&session, result, "/admin/services").await
}

async fn delete_inner(state: &AppState, id: ServiceId) -> Result<String, AppError> {
    let repo = ServiceRepository::new(state.pool());
    let service = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    let urls: Vec<&str> = service.image_url.as_deref().into_iter().collect();
    let failures = state.storage().remove_urls(&urls).await;

    repo.delete(id).await?;

    if failures.is_empty() {
        Ok("Service deleted successfully.".to_string())
    } else {
        Ok("Service deleted, but its image could not be removed from storage.".to_string())
    }
}
