//! Order and line-item models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use oraya_core::{OrderId, OrderStatus, Price, ProductId};

/// A snapshot of one purchased product at order-creation time.
///
/// Name and unit price are copied from the catalog when the order is placed,
/// so later catalog changes never alter historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: i64,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    /// Line items in the order they were committed.
    pub items: Vec<LineItem>,
    /// Sum of line totals plus the delivery fee.
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
