//! UMKM-GO Core - Shared domain library.
//!
//! This crate provides the types and pure logic used across all UMKM-GO
//! components:
//! - `storefront` - Public directory and ordering site
//! - `admin` - Listing management panel
//! - `cli` - Migrations, seeding and map-link diagnostics
//!
//! # Architecture
//!
//! The core crate does no I/O of its own: no database access and no HTTP
//! clients. Shortened map links are resolved through the [`maps::RedirectResolver`]
//! trait, which the admin binary implements on top of `reqwest`.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, rupiah prices, coordinates, statuses and listings
//! - [`maps`] - Coordinate extraction from map-service links
//! - [`cart`] - Per-visitor product selection
//! - [`order`] - Order totals, WhatsApp message text and deep links

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod maps;
pub mod order;
pub mod types;

pub use types::*;
