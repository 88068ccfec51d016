//! Per-visitor product selection.
//!
//! A cart maps each product to a quantity of at least one. Products are
//! either absent or present; there is no "present with zero" state. Every
//! mutation goes through [`Cart::apply`], which removes the line whenever the
//! resulting quantity would be zero or negative.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One (product, quantity) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A quantity change requested by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "quantity", rename_all = "snake_case")]
pub enum CartUpdate {
    /// Add one unit.
    Increment,
    /// Remove one unit; dropping below one removes the line.
    Decrement,
    /// Set an explicit quantity; zero or less removes the line.
    Set(i64),
    /// Remove the line regardless of quantity.
    Remove,
}

/// Selected products and their quantities.
///
/// Lines iterate in product-id order so rendered output is stable.
/// Serialized as a plain `{product_id: quantity}` map; zero entries are
/// dropped on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ProductId, u32>", into = "BTreeMap<ProductId, u32>")]
pub struct Cart {
    lines: BTreeMap<ProductId, u32>,
}

impl From<BTreeMap<ProductId, u32>> for Cart {
    fn from(mut lines: BTreeMap<ProductId, u32>) -> Self {
        lines.retain(|_, quantity| *quantity > 0);
        Self { lines }
    }
}

impl From<Cart> for BTreeMap<ProductId, u32> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update and return the product's new quantity (0 = absent).
    pub fn apply(&mut self, product_id: ProductId, update: CartUpdate) -> u32 {
        let current = i64::from(self.quantity(product_id));
        let next = match update {
            CartUpdate::Increment => current.saturating_add(1),
            CartUpdate::Decrement => current - 1,
            CartUpdate::Set(quantity) => quantity,
            CartUpdate::Remove => 0,
        };

        if next <= 0 {
            self.lines.remove(&product_id);
            return 0;
        }

        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.lines.insert(product_id, quantity);
        quantity
    }

    /// Current quantity of a product (0 if absent).
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.lines.get(&product_id).copied().unwrap_or(0)
    }

    /// All lines in product-id order.
    pub fn lines(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.lines
            .iter()
            .map(|(&product_id, &quantity)| CartLine {
                product_id,
                quantity,
            })
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.values().map(|&q| u64::from(q)).sum()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop lines whose product is no longer offered.
    pub fn retain(&mut self, mut keep: impl FnMut(ProductId) -> bool) {
        self.lines.retain(|&product_id, _| keep(product_id));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(n: u128) -> ProductId {
        ProductId::new(uuid::Uuid::from_u128(n))
    }

    #[test]
    fn test_increment_from_absent() {
        let mut cart = Cart::new();
        assert_eq!(cart.apply(product(1), CartUpdate::Increment), 1);
        assert_eq!(cart.apply(product(1), CartUpdate::Increment), 2);
        assert_eq!(cart.quantity(product(1)), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_decrement_from_one_removes() {
        let mut cart = Cart::new();
        cart.apply(product(1), CartUpdate::Increment);
        assert_eq!(cart.apply(product(1), CartUpdate::Decrement), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.lines().count(), 0);
    }

    #[test]
    fn test_decrement_absent_stays_absent() {
        let mut cart = Cart::new();
        assert_eq!(cart.apply(product(1), CartUpdate::Decrement), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_non_positive_removes() {
        let mut cart = Cart::new();
        cart.apply(product(1), CartUpdate::Set(3));
        assert_eq!(cart.quantity(product(1)), 3);
        assert_eq!(cart.apply(product(1), CartUpdate::Set(0)), 0);
        assert!(cart.is_empty());

        cart.apply(product(2), CartUpdate::Set(2));
        assert_eq!(cart.apply(product(2), CartUpdate::Set(-5)), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_clamps_huge_quantities() {
        let mut cart = Cart::new();
        assert_eq!(cart.apply(product(1), CartUpdate::Set(i64::MAX)), u32::MAX);
        assert_eq!(cart.apply(product(1), CartUpdate::Increment), u32::MAX);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.apply(product(1), CartUpdate::Set(4));
        assert_eq!(cart.apply(product(1), CartUpdate::Remove), 0);
        assert_eq!(cart.quantity(product(1)), 0);
    }

    #[test]
    fn test_lines_and_totals() {
        let mut cart = Cart::new();
        cart.apply(product(2), CartUpdate::Set(3));
        cart.apply(product(1), CartUpdate::Set(2));

        let lines: Vec<CartLine> = cart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, product(1));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_retain() {
        let mut cart = Cart::new();
        cart.apply(product(1), CartUpdate::Increment);
        cart.apply(product(2), CartUpdate::Increment);
        cart.retain(|id| id == product(2));
        assert_eq!(cart.quantity(product(1)), 0);
        assert_eq!(cart.quantity(product(2)), 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.apply(product(7), CartUpdate::Set(2));
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_drops_zero_quantities() {
        let json = format!(r#"{{"{}":0,"{}":3}}"#, product(1), product(2));
        let cart: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity(product(1)), 0);
        assert_eq!(cart.lines().next().unwrap().product_id, product(2));
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_update_deserializes_from_tagged_json() {
        let update: CartUpdate = serde_json::from_str(r#"{"action":"set","quantity":4}"#).unwrap();
        assert_eq!(update, CartUpdate::Set(4));
        let update: CartUpdate = serde_json::from_str(r#"{"action":"increment"}"#).unwrap();
        assert_eq!(update, CartUpdate::Increment);
    }
}
