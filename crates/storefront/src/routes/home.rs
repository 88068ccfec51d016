//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use umkm_core::{DirectoryStats, Umkm};

use crate::db::{ListingFilter, ListingRepository};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Query parameters for the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub site_name: String,
    pub umkms: Vec<Umkm>,
    pub stats: DirectoryStats,
    pub categories: Vec<String>,
    pub search: String,
    pub selected_category: String,
    pub filtered: bool,
}

/// Display the directory.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let filter = ListingFilter::new(query.q.as_deref(), query.category.as_deref());
    let repo = ListingRepository::new(state.pool());

    let umkms = repo.active_umkm(&filter).await?;
    let stats = repo.stats().await?;
    let categories = repo.categories().await?;

    Ok(HomeTemplate {
        site_name: state.config().site_name.clone(),
        umkms,
        stats,
        categories,
        search: filter.search.clone().unwrap_or_default(),
        selected_category: filter.category.clone().unwrap_or_default(),
        filtered: !filter.is_empty(),
    })
}
