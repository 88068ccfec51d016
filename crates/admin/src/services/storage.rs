//! Image uploads to object storage.
//!
//! Images go to a public bucket through the storage REST API:
//!
//! ```text
//! POST {url}/storage/v1/object/{bucket}/{name}       upload (no upsert)
//! GET  {url}/storage/v1/object/public/{bucket}/{name} public read
//! ```

use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::config::StorageConfig;

/// Largest accepted image.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Length of the random part of an object name.
const RANDOM_SUFFIX_LEN: usize = 7;

const CACHE_CONTROL_VALUE: &str = "max-age=3600";

/// Errors from validating or storing an image.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Content type outside the accepted image types.
    #[error("Tipe file tidak didukung: {0}. Gunakan JPG, PNG, atau WebP")]
    UnsupportedType(String),

    /// The file is larger than [`MAX_IMAGE_BYTES`].
    #[error("Ukuran file maksimal 5MB")]
    TooLarge(usize),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage API returned an error response.
    #[error("Storage API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl StorageError {
    /// Whether the error was caused by the uploaded file itself.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedType(_) | Self::TooLarge(_))
    }
}

/// Where an image belongs; also the object name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFolder {
    Umkm,
    Products,
}

impl UploadFolder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Umkm => "umkm",
            Self::Products => "products",
        }
    }
}

/// Check an image's declared type and size.
///
/// Returns the file extension to store it under.
///
/// # Errors
///
/// Returns `StorageError::UnsupportedType` or `StorageError::TooLarge`.
pub fn validate_image(content_type: &str, len: usize) -> Result<&'static str, StorageError> {
    let extension = match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        other => return Err(StorageError::UnsupportedType(other.to_string())),
    };
    if len > MAX_IMAGE_BYTES {
        return Err(StorageError::TooLarge(len));
    }
    Ok(extension)
}

/// Build a fresh object name: `<folder>/<unix-millis>-<random7>.<ext>`.
#[must_use]
pub fn object_name(folder: UploadFolder, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}/{millis}-{suffix}.{extension}", folder.as_str())
}

/// Object storage client.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    client: reqwest::Client,
    url: String,
    bucket: String,
    service_key: SecretString,
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("url", &self.inner.url)
            .field("bucket", &self.inner.bucket)
            .finish_non_exhaustive()
    }
}

impl StorageClient {
    /// Create a client from configuration, sharing `client` for requests.
    #[must_use]
    pub fn new(config: &StorageConfig, client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(StorageClientInner {
                client,
                url: config.url.clone(),
                bucket: config.bucket.clone(),
                service_key: config.service_key.clone(),
            }),
        }
    }

    /// Public URL of a stored object.
    #[must_use]
    pub fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{name}",
            self.inner.url, self.inner.bucket
        )
    }

    /// Validate and upload an image, returning its public URL.
    ///
    /// # Errors
    ///
    /// Returns error if the image is rejected, the request fails, or the
    /// storage API answers with a non-success status.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_image(
        &self,
        folder: UploadFolder,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, StorageError> {
        let extension = validate_image(content_type, data.len())?;
        let name = object_name(folder, extension);

        let response = self
            .inner
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{name}",
                self.inner.url, self.inner.bucket
            ))
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.inner.service_key.expose_secret()),
            )
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, CACHE_CONTROL_VALUE)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(object = %name, "Image uploaded");
        Ok(self.public_url(&name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_supported_types() {
        assert_eq!(validate_image("image/jpeg", 10).unwrap(), "jpg");
        assert_eq!(validate_image("image/jpg", 10).unwrap(), "jpg");
        assert_eq!(validate_image("image/PNG", 10).unwrap(), "png");
        assert_eq!(validate_image("image/webp", 10).unwrap(), "webp");
    }

    #[test]
    fn test_validate_rejects_other_types() {
        assert!(matches!(
            validate_image("image/gif", 10),
            Err(StorageError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_image("application/pdf", 10),
            Err(StorageError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_validate_size_limit() {
        assert!(validate_image("image/png", MAX_IMAGE_BYTES).is_ok());
        assert!(matches!(
            validate_image("image/png", MAX_IMAGE_BYTES + 1),
            Err(StorageError::TooLarge(_))
        ));
    }

    #[test]
    fn test_object_name_shape() {
        let name = object_name(UploadFolder::Products, "webp");
        let rest = name.strip_prefix("products/").unwrap();
        let (stem, ext) = rest.split_once('.').unwrap();
        assert_eq!(ext, "webp");
        let (millis, suffix) = stem.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_public_url() {
        let config = StorageConfig {
            url: "https://abc.supabase.co".to_string(),
            bucket: "umkm-images".to_string(),
            service_key: SecretString::from("key"),
        };
        let client = StorageClient::new(&config, reqwest::Client::new());
        assert_eq!(
            client.public_url("umkm/1-abcdefg.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/umkm-images/umkm/1-abcdefg.jpg"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(StorageError::TooLarge(1).is_client_error());
        assert!(
            !StorageError::Api {
                status: 500,
                message: String::new()
            }
            .is_client_error()
        );
    }
}
