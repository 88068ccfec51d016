//! Order totals, WhatsApp message text and deep links.
//!
//! Orders are never stored. When a visitor submits their cart, the
//! storefront builds an [`OrderRequest`], renders it into a message with
//! [`format_order_message`], and redirects to [`build_deep_link`]. Products
//! are looked up through the [`Catalog`] trait so the caller decides where
//! names and prices come from (usually the product list it just rendered).

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::cart::CartLine;
use crate::types::{Coordinates, Price, Product, ProductId, Umkm};

/// Messaging service base URL for deep links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

const GREETING: &str = "Halo Kak,";
const INTRO: &str = "Saya ingin memesan:";
const CLOSING: &str = "Terima kasih.";

/// Errors raised while assembling an [`OrderRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No products were selected.
    #[error("pilih minimal satu produk")]
    EmptyCart,
    /// The delivery address is empty or whitespace.
    #[error("alamat pengantaran wajib diisi")]
    MissingAddress,
    /// The business has no usable WhatsApp number.
    #[error("UMKM belum memiliki nomor WhatsApp")]
    MissingContact,
}

/// Name and unit price for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub name: &'a str,
    pub unit_price: Price,
}

/// Synchronous product lookup.
pub trait Catalog {
    /// Find a product, or `None` if it is not offered.
    fn lookup(&self, product_id: ProductId) -> Option<CatalogEntry<'_>>;
}

impl Catalog for [Product] {
    fn lookup(&self, product_id: ProductId) -> Option<CatalogEntry<'_>> {
        self.iter()
            .find(|product| product.id == product_id)
            .map(|product| CatalogEntry {
                name: &product.name,
                unit_price: product.price,
            })
    }
}

impl Catalog for HashMap<ProductId, Product> {
    fn lookup(&self, product_id: ProductId) -> Option<CatalogEntry<'_>> {
        self.get(&product_id).map(|product| CatalogEntry {
            name: &product.name,
            unit_price: product.price,
        })
    }
}

impl Catalog for HashMap<ProductId, (String, Price)> {
    fn lookup(&self, product_id: ProductId) -> Option<CatalogEntry<'_>> {
        self.get(&product_id).map(|(name, unit_price)| CatalogEntry {
            name,
            unit_price: *unit_price,
        })
    }
}

/// Contact and location details of the business receiving the order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessContact {
    pub name: String,
    pub whatsapp: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl BusinessContact {
    /// Location to include in the message; `None` unless both parts exist.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

impl From<&Umkm> for BusinessContact {
    fn from(umkm: &Umkm) -> Self {
        Self {
            name: umkm.name.clone(),
            whatsapp: umkm.whatsapp.clone(),
            latitude: umkm.latitude,
            longitude: umkm.longitude,
        }
    }
}

/// A submitted order, alive only until its message is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    business: BusinessContact,
    lines: Vec<CartLine>,
    delivery_address: String,
}

impl OrderRequest {
    /// Assemble an order from the visitor's submission.
    ///
    /// The address is kept verbatim; it only has to contain something other
    /// than whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no lines, the address is blank, or the
    /// business WhatsApp number has no digits.
    pub fn new(
        business: BusinessContact,
        lines: Vec<CartLine>,
        delivery_address: impl Into<String>,
    ) -> Result<Self, OrderError> {
        let delivery_address = delivery_address.into();

        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if delivery_address.trim().is_empty() {
            return Err(OrderError::MissingAddress);
        }
        if phone_digits(&business.whatsapp).is_empty() {
            return Err(OrderError::MissingContact);
        }

        Ok(Self {
            business,
            lines,
            delivery_address,
        })
    }

    #[must_use]
    pub const fn business(&self) -> &BusinessContact {
        &self.business
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    /// Deep link that opens a chat with the business, message pre-filled.
    #[must_use]
    pub fn deep_link(&self, catalog: &(impl Catalog + ?Sized)) -> String {
        build_deep_link(&self.business.whatsapp, &format_order_message(self, catalog))
    }
}

/// Sum `unit_price * quantity` over all lines.
///
/// Lines whose product is not in `catalog` contribute nothing.
#[must_use]
pub fn compute_total(lines: &[CartLine], catalog: &(impl Catalog + ?Sized)) -> Price {
    lines
        .iter()
        .filter_map(|line| {
            catalog
                .lookup(line.product_id)
                .map(|entry| entry.unit_price.times(line.quantity))
        })
        .sum()
}

/// Render the order as plain, line-oriented text.
///
/// One `Produk:` line per cart line whose product is in `catalog`. The
/// location block appears only when the business has both coordinates.
#[must_use]
pub fn render_order_message(order: &OrderRequest, catalog: &(impl Catalog + ?Sized)) -> String {
    let mut message = format!("{GREETING}\n\n{INTRO}\n\n");
    let _ = writeln!(message, "UMKM: {}", order.business.name);

    for line in &order.lines {
        if let Some(entry) = catalog.lookup(line.product_id) {
            let _ = writeln!(message, "Produk: {} ({} porsi)", entry.name, line.quantity);
        }
    }

    let _ = write!(
        message,
        "\nAlamat Pengantaran: {}\n\n",
        order.delivery_address
    );

    if let Some(coordinates) = order.business.coordinates() {
        message.push_str("Lokasi UMKM:\n");
        let _ = write!(message, "{}\n\n", coordinates.maps_url());
    }

    message.push_str(CLOSING);
    message
}

/// Render the order and percent-encode it for a URL query string.
///
/// Line breaks become `%0A`.
#[must_use]
pub fn format_order_message(order: &OrderRequest, catalog: &(impl Catalog + ?Sized)) -> String {
    urlencoding::encode(&render_order_message(order, catalog)).into_owned()
}

/// Keep only the ASCII digits of a phone number.
#[must_use]
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Compose `https://wa.me/<digits>?text=<encoded_message>`.
///
/// Every non-digit is stripped from `phone`. No other validation happens
/// here; callers must not submit an order without a contact number.
#[must_use]
pub fn build_deep_link(phone: &str, encoded_message: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}/{}?text={encoded_message}",
        phone_digits(phone)
    )
}

/// A cart line resolved against the catalog, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Resolved lines plus totals, as shown before the visitor confirms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub item_count: u64,
    pub total: Price,
}

impl OrderSummary {
    /// Resolve `lines` against `catalog`, skipping unknown products.
    #[must_use]
    pub fn build(lines: &[CartLine], catalog: &(impl Catalog + ?Sized)) -> Self {
        let resolved: Vec<SummaryLine> = lines
            .iter()
            .filter_map(|line| {
                catalog.lookup(line.product_id).map(|entry| SummaryLine {
                    product_id: line.product_id,
                    name: entry.name.to_owned(),
                    quantity: line.quantity,
                    unit_price: entry.unit_price,
                    line_total: entry.unit_price.times(line.quantity),
                })
            })
            .collect();

        Self {
            item_count: resolved.iter().map(|line| u64::from(line.quantity)).sum(),
            total: resolved.iter().map(|line| line.line_total).sum(),
            lines: resolved,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
