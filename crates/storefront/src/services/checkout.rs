//! Order placement.
//!
//! The checkout transaction re-validates the cart against live stock,
//! decrements inventory, and persists the order as one atomic unit. Either
//! every stock change and the order record commit together, or none do.

use serde::Deserialize;
use sqlx::SqlitePool;

use oraya_core::{OrderId, OrderStatus, Phone, Price, ProductId};

use crate::db::RepositoryError;
use crate::models::{Cart, LineItem};

/// Fixed delivery fee added once per order, in minor currency units.
pub const DELIVERY_FEE: Price = Price::new(45);

/// Customer details submitted at checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Errors that can occur when placing an order.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// A submitted field is blank or malformed.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Checkout was attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart entry references a product that no longer exists.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Live stock no longer covers the requested quantity.
    #[error("insufficient stock for product: {0}")]
    InsufficientStock(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CheckoutError {
    fn blank(field: &'static str) -> Self {
        Self::Validation {
            field,
            message: "cannot be blank".to_owned(),
        }
    }
}

/// Service running the order placement transaction.
pub struct CheckoutService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order for the given cart.
    ///
    /// Validates the customer details, then walks the cart in ascending
    /// product id order inside a single transaction. Each line performs a
    /// guarded decrement (`stock = stock - qty` only where `stock >= qty`),
    /// so the check and the decrement are indivisible with respect to
    /// concurrent checkouts: of two buyers contending for the last unit,
    /// exactly one commits. Any failing line rolls the whole transaction
    /// back with no partial effects.
    ///
    /// The caller is responsible for clearing the session cart, and must do
    /// so only after this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` for blank fields or a malformed
    /// phone number, `CheckoutError::EmptyCart` for an empty cart,
    /// `CheckoutError::UnknownProduct` / `CheckoutError::InsufficientStock`
    /// when a line fails re-validation, and `CheckoutError::Repository` for
    /// database failures.
    pub async fn place_order(
        &self,
        customer: &CustomerDetails,
        cart: &Cart,
    ) -> Result<OrderId, CheckoutError> {
        let name = customer.name.trim();
        if name.is_empty() {
            return Err(CheckoutError::blank("name"));
        }

        let address = customer.address.trim();
        if address.is_empty() {
            return Err(CheckoutError::blank("address"));
        }

        let phone = customer.phone.trim();
        if phone.is_empty() {
            return Err(CheckoutError::blank("phone"));
        }
        let phone = Phone::parse(phone).map_err(|e| CheckoutError::Validation {
            field: "phone",
            message: e.to_string(),
        })?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        // The guarded decrement is the first statement of the transaction:
        // the write lock is acquired up front, and concurrent checkouts
        // serialize on it.
        let mut items = Vec::with_capacity(cart.len());
        for (product_id, quantity) in cart.iter() {
            let affected = sqlx::query(
                "UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1",
            )
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?
            .rows_affected();

            if affected == 0 {
                // Dropping the transaction rolls back earlier decrements.
                let exists =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE id = ?1")
                        .bind(product_id)
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(RepositoryError::from)?;

                return Err(if exists == 0 {
                    CheckoutError::UnknownProduct(product_id.clone())
                } else {
                    CheckoutError::InsufficientStock(product_id.clone())
                });
            }

            let (item_name, unit_price) = sqlx::query_as::<_, (String, i64)>(
                "SELECT name, price FROM products WHERE id = ?1",
            )
            .bind(product_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            items.push(LineItem {
                product_id: product_id.clone(),
                name: item_name,
                unit_price: Price::new(unit_price),
                quantity,
            });
        }

        let total = items.iter().map(LineItem::line_total).sum::<Price>() + DELIVERY_FEE;
        let order_id = OrderId::generate();
        let created_at = chrono::Utc::now();

        sqlx::query(
            r"
            INSERT INTO orders (id, customer_name, address, phone, total, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(&order_id)
        .bind(name)
        .bind(address)
        .bind(phone.as_str())
        .bind(total)
        .bind(OrderStatus::Pending.as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        let mut position: i64 = 0;
        for item in &items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, position, product_id, name, unit_price, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(&order_id)
            .bind(position)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
            position += 1;
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        tracing::info!(order_id = %order_id, total = %total, lines = items.len(), "order placed");

        Ok(order_id)
    }
}
