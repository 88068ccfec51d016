//! Business logic services for admin.
//!
//! # Services
//!
//! - `credentials` - Single-account login check
//! - `maps` - One-hop resolution of shortened map links
//! - `storage` - Image uploads to object storage

pub mod credentials;
pub mod maps;
pub mod storage;

pub use credentials::verify_credentials;
pub use maps::{HttpRedirectResolver, ResolveError};
pub use storage::{StorageClient, StorageError, UploadFolder};
