//! Product management route handlers.
//!
//! Products are always addressed through their UMKM; the list page carries
//! the create form inline.

#![allow(clippy::used_underscore_binding)]

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use umkm_core::{Product, ProductId, ProductStatus, Umkm, UmkmId};

use crate::{
    db::{ProductRepository, UmkmRepository},
    error::Result,
    filters,
    forms::{FormError, ProductForm},
    middleware::RequireAdminAuth,
    state::AppState,
};

use super::{AdminUserView, render};

/// Product card on the list page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
    pub status: String,
    pub is_available: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            status: product.status.to_string(),
            is_available: product.is_available(),
        }
    }
}

/// Product list page with the create form.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub umkm_id: String,
    pub umkm_name: String,
    pub products: Vec<ProductView>,
    pub form: ProductForm,
    pub statuses: [ProductStatus; 2],
    pub uploads_enabled: bool,
    pub error: Option<String>,
}

/// Product edit form template.
#[derive(Template)]
#[template(path = "products/edit.html")]
pub struct ProductEditTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub umkm_id: String,
    pub umkm_name: String,
    pub product_id: String,
    pub form: ProductForm,
    pub statuses: [ProductStatus; 2],
    pub uploads_enabled: bool,
    pub error: Option<String>,
}

fn blank_form() -> ProductForm {
    ProductForm {
        status: ProductStatus::default().to_string(),
        ..ProductForm::default()
    }
}

async fn index_template(
    state: &AppState,
    admin_user: AdminUserView,
    umkm: &Umkm,
) -> Result<ProductsIndexTemplate> {
    let products = ProductRepository::new(state.pool())
        .list_for_umkm(umkm.id)
        .await?;

    Ok(ProductsIndexTemplate {
        admin_user,
        current_path: "/".to_string(),
        umkm_id: umkm.id.to_string(),
        umkm_name: umkm.name.clone(),
        products: products.iter().map(ProductView::from).collect(),
        form: blank_form(),
        statuses: ProductStatus::ALL,
        uploads_enabled: state.storage().is_some(),
        error: None,
    })
}

/// Product list page handler.
///
/// GET /umkm/{id}/products
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UmkmId>,
) -> Result<Html<String>> {
    let umkm = UmkmRepository::new(state.pool()).get(id).await?;
    let template = index_template(&state, AdminUserView::from(&admin), &umkm).await?;

    Ok(render(&template))
}

/// Create product handler.
///
/// POST /umkm/{id}/products
#[instrument(skip(admin, state, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<UmkmId>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let umkm = UmkmRepository::new(state.pool()).get(id).await?;

    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => {
            let mut template = index_template(&state, AdminUserView::from(&admin), &umkm).await?;
            template.form = form;
            template.error = Some(e.to_string());
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    let product = ProductRepository::new(state.pool()).create(id, &new).await?;
    tracing::info!(umkm_id = %id, product_id = %product.id, "Product created");

    Ok(Redirect::to(&format!("/umkm/{id}/products")).into_response())
}

/// Edit product form handler.
///
/// GET /umkm/{id}/products/{product_id}/edit
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((id, product_id)): Path<(UmkmId, ProductId)>,
) -> Result<Html<String>> {
    let umkm = UmkmRepository::new(state.pool()).get(id).await?;
    let product = ProductRepository::new(state.pool())
        .get(id, product_id)
        .await?;

    let template = edit_template(
        &state,
        AdminUserView::from(&admin),
        &umkm,
        product_id,
        ProductForm::from(&product),
        None,
    );
    Ok(render(&template))
}

fn edit_template(
    state: &AppState,
    admin_user: AdminUserView,
    umkm: &Umkm,
    product_id: ProductId,
    form: ProductForm,
    error: Option<&FormError>,
) -> ProductEditTemplate {
    ProductEditTemplate {
        admin_user,
        current_path: "/".to_string(),
        umkm_id: umkm.id.to_string(),
        umkm_name: umkm.name.clone(),
        product_id: product_id.to_string(),
        form,
        statuses: ProductStatus::ALL,
        uploads_enabled: state.storage().is_some(),
        error: error.map(ToString::to_string),
    }
}

/// Update product handler.
///
/// POST /umkm/{id}/products/{product_id}
#[instrument(skip(admin, state, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((id, product_id)): Path<(UmkmId, ProductId)>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let update = match form.validate() {
        Ok(update) => update,
        Err(e) => {
            let umkm = UmkmRepository::new(state.pool()).get(id).await?;
            let template = edit_template(
                &state,
                AdminUserView::from(&admin),
                &umkm,
                product_id,
                form,
                Some(&e),
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    ProductRepository::new(state.pool())
        .update(id, product_id, &update)
        .await?;
    tracing::info!(umkm_id = %id, product_id = %product_id, "Product updated");

    Ok(Redirect::to(&format!("/umkm/{id}/products")).into_response())
}

/// Delete product handler.
///
/// POST /umkm/{id}/products/{product_id}/delete
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((id, product_id)): Path<(UmkmId, ProductId)>,
) -> Result<Redirect> {
    ProductRepository::new(state.pool())
        .delete(id, product_id)
        .await?;
    tracing::info!(umkm_id = %id, product_id = %product_id, "Product deleted");

    Ok(Redirect::to(&format!("/umkm/{id}/products")))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use umkm_core::Price;

    use super::*;

    #[test]
    fn test_product_view_formats_price() {
        let product = Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            umkm_id: UmkmId::new(uuid::Uuid::new_v4()),
            name: "Nasi Kuning".to_string(),
            description: None,
            price: Price::from_rupiah(15_000),
            image_url: None,
            status: ProductStatus::Unavailable,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = ProductView::from(&product);
        assert_eq!(view.price, "Rp 15.000");
        assert_eq!(view.status, "UNAVAILABLE");
        assert!(!view.is_available);
    }
}
