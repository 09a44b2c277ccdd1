//! Order repository for the admin panel.
//!
//! Orders are only ever created by the checkout transaction
//! (see `services::checkout`); this repository lists, restatuses,
//! and deletes them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use oraya_core::{OrderId, OrderStatus, Price, ProductId};

use super::RepositoryError;
use crate::models::{LineItem, Order};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for order header queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_name: String,
    address: String,
    phone: String,
    total: i64,
    status: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    /// Attach line items and convert into the public model.
    ///
    /// The status column is open text at the storage layer; rows written by
    /// this system always hold canonical values, so anything else is
    /// corruption.
    fn into_order(self, items: Vec<LineItem>) -> Result<Order, RepositoryError> {
        let status = self.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            customer_name: self.customer_name,
            address: self.address,
            phone: self.phone,
            items,
            total: Price::new(self.total),
            status,
            created_at: self.created_at,
        })
    }
}

/// Internal row type for line-item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: String,
    product_id: String,
    name: String,
    unit_price: i64,
    quantity: i64,
}

impl From<OrderItemRow> for LineItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            product_id: ProductId::new(row.product_id),
            name: row.name,
            unit_price: Price::new(row.unit_price),
            quantity: row.quantity,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first, with their line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_name, address, phone, total, status, created_at
            FROM orders
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT order_id, product_id, name, unit_price, quantity
            FROM order_items
            ORDER BY order_id, position
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<LineItem>> = HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id.clone())
                .or_default()
                .push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    /// Set the status of an order.
    ///
    /// No transition ordering is enforced - any status from the closed set
    /// may be written over any other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has the given id.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an order and its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has the given id.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
