//! Static content pages: about and contact.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::response::{IntoResponse, Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::{OptionalUser, set_flash, take_flash};

use super::NavView;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub nav: NavView,
}

/// Display the about page.
#[instrument(skip(user))]
pub async fn about(user: OptionalUser) -> impl IntoResponse {
    AboutTemplate {
        nav: NavView::from(&user),
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub nav: NavView,
    pub flash: Option<String>,
    pub error: Option<String>,
}

/// Display the contact page.
#[instrument(skip(session, user))]
pub async fn contact(session: Session, user: OptionalUser) -> impl IntoResponse {
    ContactTemplate {
        nav: NavView::from(&user),
        flash: take_flash(&session).await,
        error: None,
    }
}

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Handle a contact form submission.
///
/// Nothing is persisted; the message is logged for the team and the visitor
/// gets an acknowledgement.
#[instrument(skip(session, user, form), fields(email = %form.email))]
pub async fn contact_submit(
    session: Session,
    user: OptionalUser,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.message.trim().is_empty()
    {
        return ContactTemplate {
            nav: NavView::from(&user),
            flash: None,
            error: Some("Name, email and message are required.".to_string()),
        }
        .into_response();
    }

    tracing::info!(
        name = %form.name.trim(),
        email = %form.email.trim(),
        "Contact form submission"
    );

    set_flash(
        &session,
        "Thanks for your message! We'll get back to you soon.",
    )
    .await;

    Redirect::to("/contact").into_response()
}
