//! End-to-end flows through the core crate: a map link pasted by the admin
//! becomes stored coordinates, and a visitor's cart becomes a WhatsApp link
//! that points back at the same place.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::convert::Infallible;

use umkm_core::cart::{Cart, CartUpdate};
use umkm_core::maps::{RedirectResolver, extract_coordinates, extract_coordinates_resolving};
use umkm_core::order::{BusinessContact, OrderRequest, compute_total};
use umkm_core::{Price, ProductId};

struct FixedRedirect(&'static str);

impl RedirectResolver for FixedRedirect {
    type Error = Infallible;

    async fn resolve(&self, _url: &str) -> Result<String, Self::Error> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn test_shortened_link_to_order_message() {
    let resolver = FixedRedirect("https://www.google.com/maps/place/Warung/@-4.0098,119.6231,17z");
    let coordinates = extract_coordinates_resolving("https://maps.app.goo.gl/abc123", &resolver)
        .await
        .unwrap();

    let nasi = ProductId::new(uuid::Uuid::from_u128(1));
    let teh = ProductId::new(uuid::Uuid::from_u128(2));
    let catalog: HashMap<ProductId, (String, Price)> = HashMap::from([
        (nasi, ("Nasi Kuning".to_string(), Price::from_rupiah(15_000))),
        (teh, ("Es Teh".to_string(), Price::from_rupiah(5_000))),
    ]);

    let mut cart = Cart::new();
    cart.apply(nasi, CartUpdate::Increment);
    cart.apply(nasi, CartUpdate::Increment);
    cart.apply(teh, CartUpdate::Set(1));

    let lines: Vec<_> = cart.lines().collect();
    assert_eq!(compute_total(&lines, &catalog), Price::from_rupiah(35_000));

    let business = BusinessContact {
        name: "Warung Daeng Ngalle".to_string(),
        whatsapp: "+62 812-3456-7890".to_string(),
        latitude: Some(coordinates.latitude),
        longitude: Some(coordinates.longitude),
    };
    let order = OrderRequest::new(business, lines, "Jl. Poros Tiro Sompe").unwrap();
    let link = order.deep_link(&catalog);

    let (base, text) = link.split_once("?text=").unwrap();
    assert_eq!(base, "https://wa.me/6281234567890");

    let decoded = urlencoding::decode(text).unwrap();
    assert!(decoded.contains("Produk: Nasi Kuning (2 porsi)"));
    assert!(decoded.contains("Produk: Es Teh (1 porsi)"));
    assert!(decoded.contains("Alamat Pengantaran: Jl. Poros Tiro Sompe"));

    let map_link = coordinates.maps_url();
    assert!(decoded.contains(&map_link));
    assert_eq!(extract_coordinates(&map_link), Some(coordinates));
}

#[tokio::test]
async fn test_failed_resolution_leaves_order_without_location() {
    struct Offline;

    impl RedirectResolver for Offline {
        type Error = std::io::Error;

        async fn resolve(&self, _url: &str) -> Result<String, Self::Error> {
            Err(std::io::Error::other("offline"))
        }
    }

    let coordinates = extract_coordinates_resolving("https://goo.gl/maps/xyz", &Offline).await;
    assert!(coordinates.is_none());

    let product = ProductId::new(uuid::Uuid::from_u128(7));
    let catalog: HashMap<ProductId, (String, Price)> =
        HashMap::from([(product, ("Tas Anyaman".to_string(), Price::from_rupiah(75_000)))]);

    let mut cart = Cart::new();
    cart.apply(product, CartUpdate::Increment);

    let business = BusinessContact {
        name: "Kerajinan Lontar".to_string(),
        whatsapp: "6282233445566".to_string(),
        latitude: coordinates.map(|c| c.latitude),
        longitude: coordinates.map(|c| c.longitude),
    };
    let order = OrderRequest::new(business, cart.lines().collect(), "Dusun Sompe").unwrap();
    let link = order.deep_link(&catalog);
    let decoded = urlencoding::decode(link.split_once("?text=").unwrap().1).unwrap();

    assert!(decoded.contains("Produk: Tas Anyaman (1 porsi)"));
    assert!(!decoded.contains("Lokasi UMKM"));
}
