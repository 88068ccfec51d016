//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{
    db::{UmkmRepository, UmkmWithCount},
    error::Result,
    filters,
    middleware::RequireAdminAuth,
    models::CurrentAdmin,
    state::AppState,
};

use super::render;

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub email: String,
    pub initial: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            email: admin.email.clone(),
            initial: admin
                .email
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Dashboard metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total_umkm: usize,
    pub active_umkm: usize,
    pub total_products: i64,
}

impl DashboardMetrics {
    fn from_rows(rows: &[UmkmWithCount]) -> Self {
        Self {
            total_umkm: rows.len(),
            active_umkm: rows.iter().filter(|row| row.umkm.is_active()).count(),
            total_products: rows.iter().map(|row| row.product_count).sum(),
        }
    }
}

/// UMKM row on the dashboard.
#[derive(Debug, Clone)]
pub struct UmkmRowView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub whatsapp: String,
    pub address: String,
    pub status: String,
    pub is_active: bool,
    pub has_location: bool,
    pub product_count: i64,
    pub created: String,
}

impl From<&UmkmWithCount> for UmkmRowView {
    fn from(row: &UmkmWithCount) -> Self {
        let umkm = &row.umkm;
        Self {
            id: umkm.id.to_string(),
            name: umkm.name.clone(),
            category: umkm.category.clone().unwrap_or_else(|| "-".to_string()),
            whatsapp: umkm.whatsapp.clone(),
            address: umkm.address.clone(),
            status: umkm.status.to_string(),
            is_active: umkm.is_active(),
            has_location: umkm.coordinates().is_some(),
            product_count: row.product_count,
            created: umkm.created_at.format("%d/%m/%Y").to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub metrics: DashboardMetrics,
    pub umkms: Vec<UmkmRowView>,
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let rows = UmkmRepository::new(state.pool())
        .list_with_product_counts()
        .await?;

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        metrics: DashboardMetrics::from_rows(&rows),
        umkms: rows.iter().map(UmkmRowView::from).collect(),
    };

    Ok(render(&template))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use umkm_core::{Umkm, UmkmId, UmkmStatus};

    use super::*;

    fn row(status: UmkmStatus, product_count: i64) -> UmkmWithCount {
        UmkmWithCount {
            umkm: Umkm {
                id: UmkmId::new(uuid::Uuid::new_v4()),
                name: "Warung Bu Sri".to_string(),
                description: None,
                category: None,
                phone: "0411123456".to_string(),
                whatsapp: "628123456789".to_string(),
                address: "Tiro Sompe".to_string(),
                latitude: Some(-4.0098),
                longitude: None,
                image_url: None,
                opening_hours: None,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            product_count,
        }
    }

    #[test]
    fn test_metrics_count_inactive_in_total_only() {
        let rows = vec![
            row(UmkmStatus::Active, 3),
            row(UmkmStatus::Inactive, 2),
            row(UmkmStatus::Active, 0),
        ];
        let metrics = DashboardMetrics::from_rows(&rows);
        assert_eq!(
            metrics,
            DashboardMetrics {
                total_umkm: 3,
                active_umkm: 2,
                total_products: 5,
            }
        );
    }

    #[test]
    fn test_row_view_needs_both_coordinates() {
        let view = UmkmRowView::from(&row(UmkmStatus::Active, 1));
        assert!(!view.has_location);
        assert_eq!(view.category, "-");
        assert_eq!(view.status, "ACTIVE");
    }

    #[test]
    fn test_admin_view_initial() {
        let view = AdminUserView::from(&CurrentAdmin::new("sri@tirosompe.id"));
        assert_eq!(view.initial, "S");
    }
}
