//! Admin form input and validation.
//!
//! Forms arrive as raw strings so a failed submission can be re-rendered
//! exactly as typed. Validation turns them into the core `New*` types.

use serde::Deserialize;
use thiserror::Error;

use umkm_core::order::phone_digits;
use umkm_core::{
    Coordinates, CoordinatesError, NewProduct, NewUmkm, Price, PriceError, Product,
    ProductStatus, Umkm, UmkmStatus,
};

/// Reasons a submitted form is rejected. Messages are shown to the admin.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} wajib diisi")]
    Required(&'static str),

    #[error("{0} harus berupa angka")]
    NotANumber(&'static str),

    #[error("Latitude dan longitude harus diisi keduanya atau dikosongkan")]
    IncompleteCoordinates,

    #[error("Koordinat tidak valid: {0}")]
    Coordinates(#[from] CoordinatesError),

    #[error("Koordinat tidak ditemukan dari link Google Maps")]
    MapsLink,

    #[error("Nomor WhatsApp harus berisi angka")]
    WhatsApp,

    #[error("Harga tidak valid: {0}")]
    Price(#[from] PriceError),

    #[error("Status tidak dikenal: {0}")]
    Status(String),
}

fn required(value: &str, label: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(label));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_number(value: &str, label: &'static str) -> Result<Option<f64>, FormError> {
    optional(value)
        .map(|v| v.parse::<f64>().map_err(|_| FormError::NotANumber(label)))
        .transpose()
}

/// UMKM create/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UmkmForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    /// Map link to derive coordinates from when they are left blank.
    pub maps_link: String,
    pub latitude: String,
    pub longitude: String,
    pub image_url: String,
    pub opening_hours: String,
    pub status: String,
}

impl UmkmForm {
    /// Coordinates typed directly into the form.
    ///
    /// # Errors
    ///
    /// Returns error if only one is filled, either is not a number, or the
    /// pair is out of range.
    pub fn typed_coordinates(&self) -> Result<Option<Coordinates>, FormError> {
        let latitude = optional_number(&self.latitude, "Latitude")?;
        let longitude = optional_number(&self.longitude, "Longitude")?;
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
            (None, None) => Ok(None),
            _ => Err(FormError::IncompleteCoordinates),
        }
    }

    /// The map link, if one was pasted.
    #[must_use]
    pub fn maps_link(&self) -> Option<&str> {
        Some(self.maps_link.trim()).filter(|link| !link.is_empty())
    }

    /// Validate into an insertable UMKM with the given location.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self, coordinates: Option<Coordinates>) -> Result<NewUmkm, FormError> {
        let name = required(&self.name, "Nama UMKM")?;
        let phone = required(&self.phone, "Nomor telepon")?;
        let whatsapp = required(&self.whatsapp, "Nomor WhatsApp")?;
        if phone_digits(&whatsapp).is_empty() {
            return Err(FormError::WhatsApp);
        }
        let address = required(&self.address, "Alamat")?;
        let status = match optional(&self.status) {
            Some(s) => s.parse::<UmkmStatus>().map_err(|_| FormError::Status(s))?,
            None => UmkmStatus::default(),
        };

        Ok(NewUmkm {
            name,
            description: optional(&self.description),
            category: optional(&self.category),
            phone,
            whatsapp,
            address,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            image_url: optional(&self.image_url),
            opening_hours: optional(&self.opening_hours),
            status,
        })
    }
}

impl From<&Umkm> for UmkmForm {
    fn from(umkm: &Umkm) -> Self {
        Self {
            name: umkm.name.clone(),
            description: umkm.description.clone().unwrap_or_default(),
            category: umkm.category.clone().unwrap_or_default(),
            phone: umkm.phone.clone(),
            whatsapp: umkm.whatsapp.clone(),
            address: umkm.address.clone(),
            maps_link: String::new(),
            latitude: umkm.latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude: umkm.longitude.map(|v| v.to_string()).unwrap_or_default(),
            image_url: umkm.image_url.clone().unwrap_or_default(),
            opening_hours: umkm.opening_hours.clone().unwrap_or_default(),
            status: umkm.status.to_string(),
        }
    }
}

/// Product create/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub status: String,
}

impl ProductForm {
    /// Validate into an insertable product.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<NewProduct, FormError> {
        let name = required(&self.name, "Nama produk")?;
        let price = Price::parse(&self.price)?;
        let status = match optional(&self.status) {
            Some(s) => s.parse::<ProductStatus>().map_err(|_| FormError::Status(s))?,
            None => ProductStatus::default(),
        };

        Ok(NewProduct {
            name,
            description: optional(&self.description),
            price,
            image_url: optional(&self.image_url),
            status,
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.amount().normalize().to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            status: product.status.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn umkm_form() -> UmkmForm {
        UmkmForm {
            name: " Warung Bu Sri ".to_string(),
            phone: "0411-123456".to_string(),
            whatsapp: "+62 812-3456-789".to_string(),
            address: "Jl. Poros Tiro Sompe".to_string(),
            ..UmkmForm::default()
        }
    }

    #[test]
    fn test_umkm_minimal_form_validates() {
        let new = umkm_form().validate(None).unwrap();
        assert_eq!(new.name, "Warung Bu Sri");
        assert_eq!(new.description, None);
        assert_eq!(new.latitude, None);
        assert_eq!(new.status, UmkmStatus::Active);
    }

    #[test]
    fn test_umkm_required_fields() {
        let form = UmkmForm {
            address: "   ".to_string(),
            ..umkm_form()
        };
        assert_eq!(form.validate(None), Err(FormError::Required("Alamat")));
    }

    #[test]
    fn test_umkm_whatsapp_needs_digits() {
        let form = UmkmForm {
            whatsapp: "belum ada".to_string(),
            ..umkm_form()
        };
        assert_eq!(form.validate(None), Err(FormError::WhatsApp));
    }

    #[test]
    fn test_typed_coordinates() {
        let form = UmkmForm {
            latitude: "-4.0098".to_string(),
            longitude: "119.6231".to_string(),
            ..umkm_form()
        };
        let coords = form.typed_coordinates().unwrap().unwrap();
        let new = form.validate(Some(coords)).unwrap();
        assert_eq!(new.latitude, Some(-4.0098));
        assert_eq!(new.longitude, Some(119.6231));
    }

    #[test]
    fn test_typed_coordinates_must_be_paired() {
        let form = UmkmForm {
            latitude: "-4.0098".to_string(),
            ..umkm_form()
        };
        assert_eq!(
            form.typed_coordinates(),
            Err(FormError::IncompleteCoordinates)
        );
    }

    #[test]
    fn test_typed_coordinates_reject_out_of_range() {
        let form = UmkmForm {
            latitude: "95".to_string(),
            longitude: "119".to_string(),
            ..umkm_form()
        };
        assert!(matches!(
            form.typed_coordinates(),
            Err(FormError::Coordinates(_))
        ));
    }

    #[test]
    fn test_typed_coordinates_reject_text() {
        let form = UmkmForm {
            latitude: "utara".to_string(),
            longitude: "119".to_string(),
            ..umkm_form()
        };
        assert_eq!(
            form.typed_coordinates(),
            Err(FormError::NotANumber("Latitude"))
        );
    }

    #[test]
    fn test_blank_maps_link_is_none() {
        let form = UmkmForm {
            maps_link: "  ".to_string(),
            ..umkm_form()
        };
        assert_eq!(form.maps_link(), None);
    }

    #[test]
    fn test_umkm_unknown_status() {
        let form = UmkmForm {
            status: "PAUSED".to_string(),
            ..umkm_form()
        };
        assert_eq!(
            form.validate(None),
            Err(FormError::Status("PAUSED".to_string()))
        );
    }

    #[test]
    fn test_product_form() {
        let form = ProductForm {
            name: "Nasi Kuning".to_string(),
            price: "15000".to_string(),
            status: "UNAVAILABLE".to_string(),
            ..ProductForm::default()
        };
        let new = form.validate().unwrap();
        assert_eq!(new.price, Price::from_rupiah(15_000));
        assert_eq!(new.status, ProductStatus::Unavailable);
    }

    #[test]
    fn test_product_form_rejects_bad_price() {
        let form = ProductForm {
            name: "Nasi Kuning".to_string(),
            price: "-5".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::Price(PriceError::Negative)));
    }

    #[test]
    fn test_product_form_rejects_unstorable_price() {
        let mut form = ProductForm {
            name: "Nasi Kuning".to_string(),
            price: "99999999999999999".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::Price(PriceError::TooLarge)));

        form.price = "1.005".to_string();
        assert_eq!(form.validate(), Err(FormError::Price(PriceError::TooPrecise)));
    }
}
