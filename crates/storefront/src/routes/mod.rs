//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Active UMKM, stats, search and category filter
//! GET  /umkm/{id}              - UMKM detail with products and the visitor's cart
//! POST /umkm/{id}/cart         - Change a product quantity (form)
//! POST /umkm/{id}/order        - Build the WhatsApp message and redirect to it
//! GET  /sitemap.xml            - Home and every active UMKM
//! GET  /manifest.json          - Web app manifest
//! ```

pub mod home;
pub mod manifest;
pub mod sitemap;
pub mod umkm;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the UMKM detail routes router.
pub fn umkm_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(umkm::show))
        .route("/{id}/cart", post(umkm::update_cart))
        .route("/{id}/order", post(umkm::place_order))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/manifest.json", get(manifest::webmanifest))
        .nest("/umkm", umkm_routes())
}
