//! Shared helpers for the integration test suites.
//!
//! These tests exercise a running server end to end; they are ignored by
//! default and need:
//! - a running `PostgreSQL` database with migrations applied
//! - the site running (`cargo run -p iq-geospatial-site`)
//! - an admin account (`iqgs-cli user create ... -r admin`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the site (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// The relay token the chat tests present.
#[must_use]
pub fn relay_token() -> Option<String> {
    std::env::var("CHAT_RELAY_TOKEN").ok()
}

/// A cookie-holding client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Sign in through the admin login form, keeping the session cookie.
///
/// Credentials come from `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`.
///
/// # Panics
///
/// Panics if the environment variables are missing or the login request
/// cannot be sent.
pub async fn admin_sign_in(client: &Client) {
    let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL not set");
    let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD not set");

    let resp = client
        .post(format!("{}/admin/login", site_base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to sign in");

    assert!(
        resp.status().is_success() || resp.status().is_redirection(),
        "admin sign-in failed with {}",
        resp.status()
    );
}
