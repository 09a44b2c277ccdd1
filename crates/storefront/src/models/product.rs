//! Product model.

use serde::Serialize;

use oraya_core::{Price, ProductId};

/// A catalog product.
///
/// `stock` is the authoritative available-quantity counter; it is only
/// decremented by the checkout transaction and never goes negative.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in whole minor currency units.
    pub price: Price,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
}
