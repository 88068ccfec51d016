//! Session keys and helpers for visitor carts.

use tower_sessions::Session;

use umkm_core::UmkmId;
use umkm_core::cart::Cart;

/// Session keys.
pub mod keys {
    /// Prefix for per-UMKM cart keys.
    pub const CART_PREFIX: &str = "cart:";
}

/// Session key under which the cart for `umkm_id` is stored.
#[must_use]
pub fn cart_key(umkm_id: UmkmId) -> String {
    format!("{}{umkm_id}", keys::CART_PREFIX)
}

/// Load the visitor's cart for an UMKM (empty if none).
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(
    session: &Session,
    umkm_id: UmkmId,
) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(&cart_key(umkm_id))
        .await?
        .unwrap_or_default())
}

/// Persist the cart, dropping the key entirely once it is empty.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(
    session: &Session,
    umkm_id: UmkmId,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    let key = cart_key(umkm_id);
    if cart.is_empty() {
        session.remove::<Cart>(&key).await?;
        Ok(())
    } else {
        session.insert(&key, cart).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_key_is_per_umkm() {
        let a = UmkmId::new(uuid::Uuid::from_u128(1));
        let b = UmkmId::new(uuid::Uuid::from_u128(2));
        assert_ne!(cart_key(a), cart_key(b));
        assert!(cart_key(a).starts_with("cart:"));
        assert!(cart_key(a).ends_with(&a.to_string()));
    }
}
