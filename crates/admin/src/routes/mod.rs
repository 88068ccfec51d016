//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Auth (single configured account)
//! GET  /auth/login                              - Login page
//! POST /auth/login                              - Check credentials
//! POST /auth/logout                             - Logout
//!
//! # Dashboard
//! GET  /                                        - All UMKM with product counts
//!
//! # UMKM
//! GET  /umkm/new                                - Create form
//! POST /umkm                                    - Create
//! GET  /umkm/{id}/edit                          - Edit form
//! POST /umkm/{id}                               - Update
//! POST /umkm/{id}/delete                        - Delete (products cascade)
//!
//! # Products
//! GET  /umkm/{id}/products                      - List + create form
//! POST /umkm/{id}/products                      - Create
//! GET  /umkm/{id}/products/{product_id}/edit    - Edit form
//! POST /umkm/{id}/products/{product_id}         - Update
//! POST /umkm/{id}/products/{product_id}/delete  - Delete
//!
//! # JSON API
//! POST /api/maps/parse                          - Map link preview
//! POST /api/uploads/{folder}                    - Image upload
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod products;
pub mod umkm;

use askama::Template;
use axum::{
    Router,
    response::Html,
    routing::{get, post},
};

use crate::state::AppState;

pub use dashboard::AdminUserView;

/// Render a template, logging failures instead of propagating them.
pub(crate) fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Create the UMKM and product management router.
fn umkm_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(umkm::create))
        .route("/new", get(umkm::new_umkm))
        .route("/{id}", post(umkm::update))
        .route("/{id}/edit", get(umkm::edit))
        .route("/{id}/delete", post(umkm::delete))
        .route(
            "/{id}/products",
            get(products::index).post(products::create),
        )
        .route("/{id}/products/{product_id}", post(products::update))
        .route("/{id}/products/{product_id}/edit", get(products::edit))
        .route("/{id}/products/{product_id}/delete", post(products::delete))
}

/// Create all page and API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .merge(auth::router())
        .nest("/umkm", umkm_routes())
        .merge(api::router())
}
