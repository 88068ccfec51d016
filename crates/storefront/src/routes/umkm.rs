//! UMKM detail, cart and order handlers.
//!
//! The cart is a per-UMKM mapping stored in the visitor's session. Quantity
//! buttons post small forms here and get redirected back to the detail page,
//! so the page works without any client-side script. Submitting the order
//! renders the message, clears the cart and redirects to WhatsApp.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use umkm_core::cart::{Cart, CartLine, CartUpdate};
use umkm_core::order::{BusinessContact, OrderRequest, OrderSummary, phone_digits};
use umkm_core::{Price, Product, ProductId, Umkm, UmkmId};

use crate::db::{ListingRepository, RepositoryError};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session::{load_cart, save_cart};
use crate::state::AppState;

/// A product row on the detail page.
pub struct ProductView {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Price,
}

/// UMKM detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "umkm/show.html")]
pub struct UmkmShowTemplate {
    pub site_name: String,
    pub umkm: Umkm,
    pub products: Vec<ProductView>,
    pub summary: OrderSummary,
    pub map_url: Option<String>,
    pub whatsapp_digits: String,
    pub address: String,
    pub error: Option<String>,
}

/// Action names posted by the quantity buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAction {
    Increment,
    Decrement,
    Set,
    Remove,
}

/// Cart update form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub product_id: ProductId,
    pub action: CartAction,
    pub quantity: Option<String>,
}

impl CartForm {
    /// Convert the posted form into a cart update.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if a `set` action has no integer quantity.
    pub fn to_update(&self) -> Result<CartUpdate> {
        Ok(match self.action {
            CartAction::Increment => CartUpdate::Increment,
            CartAction::Decrement => CartUpdate::Decrement,
            CartAction::Remove => CartUpdate::Remove,
            CartAction::Set => {
                let quantity = self
                    .quantity
                    .as_deref()
                    .map(str::trim)
                    .and_then(|q| q.parse::<i64>().ok())
                    .ok_or_else(|| AppError::BadRequest("jumlah tidak valid".to_string()))?;
                CartUpdate::Set(quantity)
            }
        })
    }
}

/// Order form data.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub address: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Load an active UMKM, its available products, and the visitor's cart.
///
/// Cart lines for products that are no longer offered are dropped.
async fn load_detail(
    state: &AppState,
    session: &Session,
    id: UmkmId,
) -> Result<(Umkm, Vec<Product>, Cart)> {
    let repo = ListingRepository::new(state.pool());

    let umkm = repo.active_umkm_by_id(id).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound("UMKM tidak ditemukan".to_string()),
        other => AppError::Database(other),
    })?;
    let products = repo.available_products(id).await?;

    let mut cart = load_cart(session, id).await?;
    cart.retain(|product_id| products.iter().any(|p| p.id == product_id));

    Ok((umkm, products, cart))
}

fn render_detail(
    state: &AppState,
    umkm: Umkm,
    products: Vec<Product>,
    cart: &Cart,
    address: String,
    error: Option<String>,
) -> UmkmShowTemplate {
    let lines: Vec<CartLine> = cart.lines().collect();
    let summary = OrderSummary::build(&lines, products.as_slice());

    let products = products
        .into_iter()
        .map(|product| {
            let quantity = cart.quantity(product.id);
            ProductView {
                line_total: product.price.times(quantity),
                quantity,
                product,
            }
        })
        .collect();

    UmkmShowTemplate {
        site_name: state.config().site_name.clone(),
        map_url: umkm.coordinates().map(|c| c.maps_url()),
        whatsapp_digits: phone_digits(&umkm.whatsapp),
        umkm,
        products,
        summary,
        address,
        error,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display an UMKM with its products.
#[instrument(skip(state, session), fields(umkm_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UmkmId>,
) -> Result<UmkmShowTemplate> {
    let (umkm, products, cart) = load_detail(&state, &session, id).await?;
    Ok(render_detail(&state, umkm, products, &cart, String::new(), None))
}

/// Apply a quantity change and return to the detail page.
#[instrument(skip(state, session, form), fields(umkm_id = %id))]
pub async fn update_cart(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UmkmId>,
    Form(form): Form<CartForm>,
) -> Result<Redirect> {
    let update = form.to_update()?;
    let (_, products, mut cart) = load_detail(&state, &session, id).await?;

    if !products.iter().any(|p| p.id == form.product_id) {
        return Err(AppError::NotFound("produk tidak tersedia".to_string()));
    }

    let quantity = cart.apply(form.product_id, update);
    save_cart(&session, id, &cart).await?;
    tracing::debug!(product_id = %form.product_id, quantity, lines = cart.len(), "cart updated");

    Ok(Redirect::to(&format!("/umkm/{id}#produk-{}", form.product_id)))
}

/// Build the order message and hand the visitor over to WhatsApp.
///
/// Invalid submissions re-render the detail page with the error and the
/// address the visitor typed.
#[instrument(skip(state, session, form), fields(umkm_id = %id))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UmkmId>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let (umkm, products, cart) = load_detail(&state, &session, id).await?;
    let lines: Vec<CartLine> = cart.lines().collect();

    let order = match OrderRequest::new(BusinessContact::from(&umkm), lines, form.address.clone())
    {
        Ok(order) => order,
        Err(e) => {
            tracing::debug!(error = %e, "order rejected");
            let page = render_detail(&state, umkm, products, &cart, form.address, Some(e.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let link = order.deep_link(products.as_slice());

    save_cart(&session, id, &Cart::new()).await?;

    let umkm_id = id.to_string();
    add_breadcrumb("order", "Order handed off to WhatsApp", Some(&[("umkm_id", umkm_id.as_str())]));
    tracing::info!(items = cart.total_items(), "order handed off to WhatsApp");

    Ok(Redirect::to(&link).into_response())
}
