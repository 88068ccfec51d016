//! Authentication route handlers for admin.
//!
//! One admin account, configured through `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
//! A successful login is remembered in the server-side session.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{self, AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, session_keys};
use crate::services::verify_credentials;
use crate::state::AppState;

use super::render;

const LOGIN_FAILED: &str = "Email atau password salah";

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPageTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page, or go to the dashboard when already logged in.
///
/// GET /auth/login
async fn login_page(session: Session) -> error::Result<Response> {
    let current: Option<CurrentAdmin> = session.get(session_keys::CURRENT_ADMIN).await?;
    if current.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let template = LoginPageTemplate {
        email: String::new(),
        error: None,
    };
    Ok(render(&template).into_response())
}

/// Check the submitted credentials.
///
/// POST /auth/login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let config = state.config();
    if !verify_credentials(
        &config.credentials,
        &config.session_secret,
        &form.email,
        &form.password,
    ) {
        tracing::warn!(email = %form.email, "Admin login rejected");
        let template = LoginPageTemplate {
            email: form.email,
            error: Some(LOGIN_FAILED.to_string()),
        };
        return Ok((StatusCode::UNAUTHORIZED, render(&template)).into_response());
    }

    let admin = CurrentAdmin::new(config.credentials.email.clone());
    set_current_admin(&session, &admin).await?;
    set_sentry_user(&admin.email);
    tracing::info!("Admin logged in");

    Ok(Redirect::to("/").into_response())
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    clear_sentry_user();

    Redirect::to("/auth/login")
}
