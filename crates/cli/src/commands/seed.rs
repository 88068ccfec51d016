//! Seed the database with UMKM listings and products from YAML.
//!
//! ```yaml
//! umkm:
//!   - name: Warung Daeng Ngalle
//!     category: Kuliner
//!     phone: "081234567890"
//!     whatsapp: "6281234567890"
//!     address: Jl. Poros Tiro Sompe
//!     maps_link: https://maps.google.com/?q=-4.0098,119.6231
//!     products:
//!       - name: Nasi Kuning
//!         price: 15000
//! ```
//!
//! Coordinates come either from `latitude`/`longitude` or from a map link.
//! The whole file is validated before the database is touched.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use umkm_admin::db::{self, ProductRepository, UmkmRepository};
use umkm_core::maps::extract_coordinates;
use umkm_core::{
    Coordinates, CoordinatesError, NewProduct, NewUmkm, Price, PriceError, ProductStatus, UmkmStatus,
};

use super::database_url;

/// Top-level seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub umkm: Vec<SeedUmkm>,
}

/// One UMKM entry with its products.
#[derive(Debug, Deserialize)]
pub struct SeedUmkm {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_link: Option<String>,
    pub image_url: Option<String>,
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub status: UmkmStatus,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

/// One product entry.
#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
}

/// A validation problem in a seed entry.
#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("{umkm}: field `{field}` must not be blank")]
    Blank { umkm: String, field: &'static str },

    #[error("{umkm}: latitude and longitude must be given together")]
    IncompleteCoordinates { umkm: String },

    #[error("{umkm}: {source}")]
    Coordinates {
        umkm: String,
        source: CoordinatesError,
    },

    #[error("{umkm}: no coordinates found in map link")]
    MapsLink { umkm: String },

    #[error("{umkm}: invalid price for {product}: {source}")]
    Price {
        umkm: String,
        product: String,
        source: PriceError,
    },
}

impl SeedUmkm {
    fn location(&self) -> Result<Option<Coordinates>, SeedError> {
        let umkm = || self.name.clone();
        match (self.latitude, self.longitude, self.maps_link.as_deref()) {
            (Some(latitude), Some(longitude), _) => Coordinates::new(latitude, longitude)
                .map(Some)
                .map_err(|source| SeedError::Coordinates {
                    umkm: umkm(),
                    source,
                }),
            (Some(_), None, _) | (None, Some(_), _) => {
                Err(SeedError::IncompleteCoordinates { umkm: umkm() })
            }
            (None, None, Some(link)) => extract_coordinates(link)
                .map(Some)
                .ok_or_else(|| SeedError::MapsLink { umkm: umkm() }),
            (None, None, None) => Ok(None),
        }
    }

    /// Validate the entry and split it into the rows to insert.
    ///
    /// # Errors
    ///
    /// Returns the first problem found in the entry or its products.
    pub fn validate(&self) -> Result<(NewUmkm, Vec<NewProduct>), SeedError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("whatsapp", &self.whatsapp),
            ("address", &self.address),
        ];
        if let Some((field, _)) = required
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(SeedError::Blank {
                umkm: self.name.clone(),
                field,
            });
        }

        let location = self.location()?;

        let products = self
            .products
            .iter()
            .map(|product| {
                if product.name.trim().is_empty() {
                    return Err(SeedError::Blank {
                        umkm: self.name.clone(),
                        field: "products.name",
                    });
                }
                let price = product.price.storable().map_err(|source| SeedError::Price {
                    umkm: self.name.clone(),
                    product: product.name.clone(),
                    source,
                })?;
                Ok(NewProduct {
                    name: product.name.trim().to_string(),
                    description: product.description.clone(),
                    price,
                    image_url: product.image_url.clone(),
                    status: product.status,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let umkm = NewUmkm {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            category: self.category.clone(),
            phone: self.phone.trim().to_string(),
            whatsapp: self.whatsapp.trim().to_string(),
            address: self.address.trim().to_string(),
            latitude: location.map(|c| c.latitude),
            longitude: location.map(|c| c.longitude),
            image_url: self.image_url.clone(),
            opening_hours: self.opening_hours.clone(),
            status: self.status,
        };

        Ok((umkm, products))
    }
}

/// Validate every entry, collecting all problems.
fn validate_file(file: &SeedFile) -> (Vec<(NewUmkm, Vec<NewProduct>)>, Vec<SeedError>) {
    let mut rows = Vec::with_capacity(file.umkm.len());
    let mut errors = Vec::new();
    for entry in &file.umkm {
        match entry.validate() {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(e),
        }
    }
    (rows, errors)
}

/// Seed UMKM and products from a YAML file.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing, the file cannot be read or
/// fails validation, or an insert fails.
pub async fn from_file(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let database_url: SecretString = database_url()?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let file: SeedFile = serde_yaml::from_str(&content)?;

    let (rows, errors) = validate_file(&file);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!(umkm = rows.len(), "Seed file validated");

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let umkm_repo = UmkmRepository::new(&pool);
    let product_repo = ProductRepository::new(&pool);
    let mut product_count = 0usize;

    for (new_umkm, products) in &rows {
        let umkm = umkm_repo.create(new_umkm).await?;
        for product in products {
            product_repo.create(umkm.id, product).await?;
        }
        product_count += products.len();
        info!(id = %umkm.id, name = %umkm.name, products = products.len(), "UMKM inserted");
    }

    info!("Seeding complete!");
    info!("  UMKM inserted: {}", rows.len());
    info!("  Products inserted: {product_count}");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
umkm:
  - name: Warung Daeng Ngalle
    category: Kuliner
    phone: "081234567890"
    whatsapp: "6281234567890"
    address: Jl. Poros Tiro Sompe
    maps_link: https://www.google.com/maps/place/@-4.0098,119.6231,17z
    products:
      - name: Nasi Kuning
        price: 15000
      - name: Es Teh
        price: 5000
        status: UNAVAILABLE
  - name: Kerajinan Lontar
    phone: "081200000000"
    whatsapp: "6281200000000"
    address: Desa Tiro Sompe
    status: INACTIVE
"#;

    fn parse(yaml: &str) -> SeedFile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_sample_file_validates() {
        let file = parse(SAMPLE);
        let (rows, errors) = validate_file(&file);
        assert!(errors.is_empty());
        assert_eq!(rows.len(), 2);

        let (warung, products) = &rows[0];
        assert_eq!(warung.latitude, Some(-4.0098));
        assert_eq!(warung.longitude, Some(119.6231));
        assert_eq!(warung.status, UmkmStatus::Active);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Price::from_rupiah(15_000));
        assert_eq!(products[1].status, ProductStatus::Unavailable);

        let (lontar, products) = &rows[1];
        assert_eq!(lontar.latitude, None);
        assert_eq!(lontar.status, UmkmStatus::Inactive);
        assert!(products.is_empty());
    }

    #[test]
    fn test_explicit_coordinates_win_over_link() {
        let file = parse(
            r#"
umkm:
  - name: A
    phone: "1"
    whatsapp: "62811"
    address: X
    latitude: -4.5
    longitude: 119.5
    maps_link: https://maps.google.com/?q=-4.0098,119.6231
"#,
        );
        let (umkm, _) = file.umkm[0].validate().unwrap();
        assert_eq!(umkm.latitude, Some(-4.5));
        assert_eq!(umkm.longitude, Some(119.5));
    }

    #[test]
    fn test_blank_whatsapp_rejected() {
        let file = parse(
            r#"
umkm:
  - name: A
    phone: "1"
    whatsapp: "  "
    address: X
"#,
        );
        assert_eq!(
            file.umkm[0].validate().unwrap_err(),
            SeedError::Blank {
                umkm: "A".to_string(),
                field: "whatsapp"
            }
        );
    }

    #[test]
    fn test_oversized_price_rejected_before_insert() {
        let file = parse(
            r#"
umkm:
  - name: A
    phone: "1"
    whatsapp: "62811"
    address: X
    products:
      - name: Typo
        price: 99999999999999999
"#,
        );
        assert_eq!(
            file.umkm[0].validate().unwrap_err(),
            SeedError::Price {
                umkm: "A".to_string(),
                product: "Typo".to_string(),
                source: PriceError::TooLarge,
            }
        );
    }

    #[test]
    fn test_half_coordinates_rejected() {
        let file = parse(
            r#"
umkm:
  - name: A
    phone: "1"
    whatsapp: "62811"
    address: X
    latitude: -4.5
"#,
        );
        assert!(matches!(
            file.umkm[0].validate(),
            Err(SeedError::IncompleteCoordinates { .. })
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let file = parse(
            r#"
umkm:
  - name: A
    phone: "1"
    whatsapp: "62811"
    address: X
    latitude: 95.0
    longitude: 119.5
"#,
        );
        assert!(matches!(
            file.umkm[0].validate(),
            Err(SeedError::Coordinates { .. })
        ));
    }

    #[test]
    fn test_unparseable_link_rejected() {
        let file = parse(
            r#"
umkm:
  - name: A
    phone: "1"
    whatsapp: "62811"
    address: X
    maps_link: https://maps.app.goo.gl/abc123
"#,
        );
        assert!(matches!(
            file.umkm[0].validate(),
            Err(SeedError::MapsLink { .. })
        ));
    }

    #[test]
    fn test_errors_collected_across_entries() {
        let file = parse(
            r#"
umkm:
  - name: ""
    phone: "1"
    whatsapp: "62811"
    address: X
  - name: B
    phone: "1"
    whatsapp: "62811"
    address: X
    products:
      - name: Bad
        price: -1
"#,
        );
        let (rows, errors) = validate_file(&file);
        assert!(rows.is_empty());
        assert_eq!(errors.len(), 2);
    }
}
