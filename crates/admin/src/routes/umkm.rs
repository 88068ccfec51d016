//! UMKM management route handlers.
//!
//! Coordinates come from the latitude/longitude fields when filled, else
//! from the pasted map link (following a shortened link once).

#![allow(clippy::used_underscore_binding)]

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use umkm_core::maps::extract_coordinates_resolving;
use umkm_core::{Coordinates, UmkmId, UmkmStatus};

use crate::{
    db::UmkmRepository,
    error::Result,
    filters,
    forms::{FormError, UmkmForm},
    middleware::RequireAdminAuth,
    state::AppState,
};

use super::{AdminUserView, render};

/// UMKM create/edit form template.
#[derive(Template)]
#[template(path = "umkm/form.html")]
pub struct UmkmFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    /// Set when editing an existing UMKM.
    pub umkm_id: Option<String>,
    pub form: UmkmForm,
    pub statuses: [UmkmStatus; 2],
    pub uploads_enabled: bool,
    pub error: Option<String>,
}

impl UmkmFormTemplate {
    fn new(state: &AppState, admin_user: AdminUserView, umkm_id: Option<UmkmId>) -> Self {
        Self {
            admin_user,
            current_path: "/".to_string(),
            umkm_id: umkm_id.map(|id| id.to_string()),
            form: UmkmForm {
                status: UmkmStatus::default().to_string(),
                ..UmkmForm::default()
            },
            statuses: UmkmStatus::ALL,
            uploads_enabled: state.storage().is_some(),
            error: None,
        }
    }

    fn with_error(mut self, form: UmkmForm, error: &FormError) -> Response {
        self.form = form;
        self.error = Some(error.to_string());
        (StatusCode::UNPROCESSABLE_ENTITY, render(&self)).into_response()
    }
}

/// Work out where the UMKM is.
///
/// Typed coordinates win. Otherwise the map link, if any, must yield a
/// location; a link that doesn't is reported rather than silently dropped.
async fn resolve_location(
    state: &AppState,
    form: &UmkmForm,
) -> std::result::Result<Option<Coordinates>, FormError> {
    if let Some(coordinates) = form.typed_coordinates()? {
        return Ok(Some(coordinates));
    }

    let Some(link) = form.maps_link() else {
        return Ok(None);
    };

    extract_coordinates_resolving(link, state.maps_resolver())
        .await
        .map(Some)
        .ok_or(FormError::MapsLink)
}

/// New UMKM form handler.
///
/// GET /umkm/new
#[instrument(skip(admin, state))]
pub async fn new_umkm(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    render(&UmkmFormTemplate::new(
        &state,
        AdminUserView::from(&admin),
        None,
    ))
}

/// Create UMKM handler.
///
/// POST /umkm
#[instrument(skip(admin, state, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<UmkmForm>,
) -> Result<Response> {
    let template = UmkmFormTemplate::new(&state, AdminUserView::from(&admin), None);

    let validated = resolve_location(&state, &form)
        .await
        .and_then(|coordinates| form.validate(coordinates));
    let new = match validated {
        Ok(new) => new,
        Err(e) => return Ok(template.with_error(form, &e)),
    };

    let umkm = UmkmRepository::new(state.pool()).create(&new).await?;
    tracing::info!(umkm_id = %umkm.id, name = %umkm.name, "UMKM created");

    Ok(Redirect::to(&format!("/umkm/{}/products", umkm.id)).into_response())
}

/// Edit UMKM form handler.
///
/// GET /umkm/{id}/edit
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UmkmId>,
) -> Result<Html<String>> {
    let umkm = UmkmRepository::new(state.pool()).get(id).await?;

    let mut template = UmkmFormTemplate::new(&state, AdminUserView::from(&admin), Some(id));
    template.form = UmkmForm::from(&umkm);

    Ok(render(&template))
}

/// Update UMKM handler.
///
/// POST /umkm/{id}
#[instrument(skip(admin, state, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UmkmId>,
    Form(form): Form<UmkmForm>,
) -> Result<Response> {
    let template = UmkmFormTemplate::new(&state, AdminUserView::from(&admin), Some(id));

    let validated = resolve_location(&state, &form)
        .await
        .and_then(|coordinates| form.validate(coordinates));
    let update = match validated {
        Ok(update) => update,
        Err(e) => return Ok(template.with_error(form, &e)),
    };

    UmkmRepository::new(state.pool()).update(id, &update).await?;
    tracing::info!(umkm_id = %id, "UMKM updated");

    Ok(Redirect::to("/").into_response())
}

/// Delete UMKM handler. Its products go with it.
///
/// POST /umkm/{id}/delete
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UmkmId>,
) -> Result<Redirect> {
    UmkmRepository::new(state.pool()).delete(id).await?;
    tracing::info!(umkm_id = %id, "UMKM deleted");

    Ok(Redirect::to("/"))
}
