//! Software catalog management routes.
//!
//! Each product can carry up to three uploads (image, installer,
//! documentation) under their own bucket prefixes. Installers are capped
//! at 50 MB; bigger binaries are linked through the direct-download URL
//! field instead, and an uploaded file always wins over a pasted URL.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use iq_geospatial_core::SoftwareProductId;

use crate::db::SoftwareRepository;
use crate::db::software::SoftwareChanges;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, set_flash, take_flash};
use crate::models::SoftwareProduct;
use crate::state::AppState;
use crate::storage::{
    SOFTWARE_DOCS_PREFIX, SOFTWARE_IMAGES_PREFIX, SOFTWARE_INSTALLERS_PREFIX, unique_object_name,
};

use super::super::AdminUserView;
use super::flash_outcome;
use super::forms::{AdminForm, validate_installer_size, validate_software_form};

/// A software row in the management table.
pub struct SoftwareRowView {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub installer_url: Option<String>,
    pub documentation_url: Option<String>,
    pub video_url: Option<String>,
}

impl From<&SoftwareProduct> for SoftwareRowView {
    fn from(product: &SoftwareProduct) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            installer_url: product.installer_url.clone(),
            documentation_url: product.documentation_url.clone(),
            video_url: product.video_url.clone(),
        }
    }
}

/// Pre-filled values for the edit form.
pub struct SoftwareFormView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub video_url: String,
    pub installer_url: String,
}

impl From<&SoftwareProduct> for SoftwareFormView {
    fn from(product: &SoftwareProduct) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            video_url: product.video_url.clone().unwrap_or_default(),
            installer_url: product.installer_url.clone().unwrap_or_default(),
        }
    }
}

/// Software management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/software.html")]
pub struct AdminSoftwareTemplate {
    pub admin_user: AdminUserView,
    pub flash: Option<String>,
    pub products: Vec<SoftwareRowView>,
    pub editing: Option<SoftwareFormView>,
}

async fn render_panel(
    state: &AppState,
    admin_user: AdminUserView,
    session: &Session,
    editing: Option<SoftwareFormView>,
) -> Result<AdminSoftwareTemplate, AppError> {
    let products = SoftwareRepository::new(state.pool()).list_all().await?;

    Ok(AdminSoftwareTemplate {
        admin_user,
        flash: take_flash(session).await,
        products: products.iter().map(SoftwareRowView::from).collect(),
        editing,
    })
}

/// List software with the create form.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    render_panel(&state, AdminUserView::from(&admin), &session, None).await
}

/// List software with the edit form pre-filled.
#[instrument(skip(admin, state, session))]
pub async fn edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let product = SoftwareRepository::new(state.pool())
        .get_by_id(SoftwareProductId::new(id))
        .await?;

    let Some(product) = product else {
        set_flash(&session, "That software product no longer exists.").await;
        return Ok(Redirect::to("/admin/software").into_response());
    };

    let template = render_panel(
        &state,
        AdminUserView::from(&admin),
        &session,
        Some(SoftwareFormView::from(&product)),
    )
    .await?;

    Ok(template.into_response())
}

/// The three optional uploads, resolved to URLs.
struct UploadedUrls {
    image_url: Option<String>,
    installer_url: Option<String>,
    documentation_url: Option<String>,
}

/// Validate and upload the form's files.
///
/// The installer size check runs before any byte leaves the server. An
/// uploaded installer overrides the pasted URL field.
async fn upload_files(state: &AppState, form: &AdminForm) -> Result<UploadedUrls, AppError> {
    if let Some(installer) = form.file("installer") {
        validate_installer_size(&installer.filename, installer.size_bytes())
            .map_err(AppError::Validation)?;
    }

    let mut urls = UploadedUrls {
        image_url: None,
        installer_url: None,
        documentation_url: None,
    };

    if let Some(file) = form.file("image") {
        let path = unique_object_name(SOFTWARE_IMAGES_PREFIX, &file.filename);
        urls.image_url = Some(
            state
                .storage()
                .upload(&path, &file.content_type, file.bytes.clone())
                .await?,
        );
    }

    if let Some(file) = form.file("installer") {
        let path = unique_object_name(SOFTWARE_INSTALLERS_PREFIX, &file.filename);
        urls.installer_url = Some(
            state
                .storage()
                .upload(&path, &file.content_type, file.bytes.clone())
                .await?,
        );
    }

    if let Some(file) = form.file("documentation") {
        let path = unique_object_name(SOFTWARE_DOCS_PREFIX, &file.filename);
        urls.documentation_url = Some(
            state
                .storage()
                .upload(&path, &file.content_type, file.bytes.clone())
                .await?,
        );
    }

    Ok(urls)
}

/// Create a software product.
///
/// POST /admin/software (multipart)
#[instrument(skip(_admin, state, session, multipart))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Redirect {
    let result = create_inner(&state, multipart).await;
    flash_outcome(&session, result, "/admin/software").await
}

async fn create_inner(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let form = AdminForm::from_multipart(multipart).await?;

    let name = form.text("name");
    validate_software_form(name).map_err(AppError::Validation)?;

    let uploaded = upload_files(state, &form).await?;

    // The uploaded installer wins; the URL field is the size-limit escape hatch.
    let installer_url = uploaded
        .installer_url
        .as_deref()
        .or_else(|| form.optional_text("installer_url"));

    SoftwareRepository::new(state.pool())
        .create(SoftwareChanges {
            name,
            description: form.text("description"),
            video_url: form.optional_text("video_url"),
            image_url: uploaded.image_url.as_deref(),
            installer_url,
            documentation_url: uploaded.documentation_url.as_deref(),
        })
        .await?;

    Ok("Software added successfully!".to_string())
}

/// Update a software product.
///
/// POST /admin/software/{id} (multipart)
///
/// Untouched file inputs preserve the existing URLs; a replaced file
/// overwrites only the field it belongs to.
#[instrument(skip(_admin, state, session, multipart))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Redirect {
    let result = update_inner(&state, SoftwareProductId::new(id), multipart).await;
    flash_outcome(&session, result, "/admin/software").await
}

async fn update_inner(
    state: &AppState,
    id: SoftwareProductId,
    multipart: Multipart,
) -> Result<String, AppError> {
    let repo = SoftwareRepository::new(state.pool());
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("software product {id}")))?;

    let form = AdminForm::from_multipart(multipart).await?;

    let name = form.text("name");
    validate_software_form(name).map_err(AppError::Validation)?;

    let uploaded = upload_files(state, &form).await?;

    let image_url = uploaded.image_url.or(existing.image_url);
    let documentation_url = uploaded.documentation_url.or(existing.documentation_url);
    let installer_url = uploaded
        .installer_url
        .or_else(|| form.optional_text("installer_url").map(ToString::to_string))
        .or(existing.installer_url);

    repo.update(
        id,
        SoftwareChanges {
            name,
            description: form.text("description"),
            video_url: form.optional_text("video_url"),
            image_url: image_url.as_deref(),
            installer_url: installer_url.as_deref(),
            documentation_url: documentation_url.as_deref(),
        },
    )
    .await?;

    Ok("Software updated successfully!".to_string())
}

/// Delete a software product and its uploaded files.
///
/// POST /admin/software/{id}/delete
///
/// Every stored file URL gets one removal attempt; failures are surfaced
/// in the flash message but the row deletion always proceeds.
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Redirect {
    let result = delete_inner(&state, SoftwareProductId::new(id)).await;
    flash_outcome(&session, result, "/admin/software").await
}

async fn delete_inner(state: &AppState, id: SoftwareProductId) -> Result<String, AppError> {
    let repo = SoftwareRepository::new(state.pool());
    let product = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("software product {id}")))?;

    let failures = state.storage().remove_urls(&product.file_urls()).await;

    repo.delete(id).await?;

    if failures.is_empty() {
        Ok("Software deleted successfully.".to_string())
    } else {
        Ok(format!(
            "Software deleted, but {} file(s) could not be removed from storage.",
            failures.len()
        ))
    }
}
