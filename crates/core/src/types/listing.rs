//! Business and product listings.
//!
//! These are the shapes both binaries read from the database. Write paths
//! use the `New*` structs so ids and timestamps stay database-generated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coordinates::Coordinates;
use super::id::{ProductId, UmkmId};
use super::price::Price;
use super::status::{ProductStatus, UmkmStatus};

/// A local business listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Umkm {
    pub id: UmkmId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub phone: String,
    /// WhatsApp number as typed by the admin, e.g. `628123456789`.
    pub whatsapp: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub opening_hours: Option<String>,
    pub status: UmkmStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Umkm {
    /// Location, if both coordinates are stored and valid.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UmkmStatus::Active
    }
}

/// A product sold by an UMKM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,
    pub umkm_id: UmkmId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub image_url: Option<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }
}

/// Fields for creating or replacing an UMKM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUmkm {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub status: UmkmStatus,
}

/// Fields for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
}

/// Public site statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct DirectoryStats {
    pub active_umkm: i64,
    pub available_products: i64,
    pub categories: i64,
}
