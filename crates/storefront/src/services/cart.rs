//! Cart mutation service.
//!
//! Validates cart additions against current stock as early feedback for the
//! shopper. The check is best-effort only - stock can change between here
//! and checkout, where the authoritative re-validation happens.

use sqlx::SqlitePool;

use oraya_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::Cart;

/// Errors that can occur when mutating a cart.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The product id does not exist in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The requested cumulative quantity exceeds current stock.
    #[error("insufficient stock for product {product_id}: {available} available")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service for validated cart mutations.
pub struct CartService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Add `delta` to a product's quantity in the cart.
    ///
    /// A positive delta is checked so the cumulative requested quantity does
    /// not exceed current stock; negative deltas (removals) skip the stock
    /// check. On error the cart is left unchanged. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if the product id does not exist.
    /// Returns `CartError::InsufficientStock` if the cumulative quantity
    /// exceeds current stock.
    pub async fn add(
        &self,
        cart: &mut Cart,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<i64, CartError> {
        let available = self
            .products
            .stock(product_id)
            .await?
            .ok_or_else(|| CartError::UnknownProduct(product_id.clone()))?;

        if delta > 0 {
            let requested = cart.quantity(product_id) + delta;
            if requested > available {
                return Err(CartError::InsufficientStock {
                    product_id: product_id.clone(),
                    available,
                });
            }
        }

        Ok(cart.add(product_id, delta))
    }
}
