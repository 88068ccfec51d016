//! API route handlers for admin.
//!
//! JSON endpoints called from the admin forms' script. Unauthenticated
//! calls get 401 rather than a login redirect.

pub mod maps;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(maps::router())
        .merge(uploads::router())
}
