//! Core types for UMKM-GO.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coordinates;
pub mod id;
pub mod listing;
pub mod price;
pub mod status;

pub use coordinates::{Coordinates, CoordinatesError, MAPS_QUERY_URL};
pub use id::*;
pub use listing::{DirectoryStats, NewProduct, NewUmkm, Product, Umkm};
pub use price::{Price, PriceError};
pub use status::*;
