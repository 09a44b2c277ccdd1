//! Session cart model.
//!
//! The cart is a desired-purchase mapping, not a reservation: quantities are
//! advisory until checkout re-validates them against live stock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use oraya_core::ProductId;

/// A session-scoped mapping of product id to requested quantity.
///
/// Absence of a key means zero. Backed by a `BTreeMap` so iteration is in
/// ascending product id order - checkout relies on this stable order when
/// touching product rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<ProductId, i64>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested quantity for a product (zero if absent).
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> i64 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Add `delta` (possibly negative) to a product's quantity.
    ///
    /// The quantity clamps at zero, and a zero quantity removes the key
    /// entirely. Returns the new quantity.
    pub fn add(&mut self, id: &ProductId, delta: i64) -> i64 {
        let new_quantity = (self.quantity(id) + delta).max(0);
        if new_quantity == 0 {
            self.0.remove(id);
        } else {
            self.0.insert(id.clone(), new_quantity);
        }
        new_quantity
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate line entries in ascending product id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, i64)> {
        self.0.iter().map(|(id, qty)| (id, *qty))
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_accumulates() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&pid("p1"), 2), 2);
        assert_eq!(cart.add(&pid("p1"), 3), 5);
        assert_eq!(cart.quantity(&pid("p1")), 5);
    }

    #[test]
    fn test_negative_delta_removes_at_zero() {
        let mut cart = Cart::new();
        cart.add(&pid("p1"), 2);
        assert_eq!(cart.add(&pid("p1"), -2), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.quantity(&pid("p1")), 0);
    }

    #[test]
    fn test_clamps_below_zero() {
        let mut cart = Cart::new();
        cart.add(&pid("p1"), 1);
        assert_eq!(cart.add(&pid("p1"), -5), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_removal_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&pid("p1"), 3);
        let current = cart.quantity(&pid("p1"));
        cart.add(&pid("p1"), -current);
        cart.add(&pid("p1"), -current);
        assert_eq!(cart.quantity(&pid("p1")), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_iterates_in_ascending_id_order() {
        let mut cart = Cart::new();
        cart.add(&pid("p3"), 1);
        cart.add(&pid("p1"), 1);
        cart.add(&pid("p2"), 1);

        let ids: Vec<&str> = cart.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_serde_shape_is_plain_mapping() {
        let mut cart = Cart::new();
        cart.add(&pid("p1"), 2);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"p1":2}"#);

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
