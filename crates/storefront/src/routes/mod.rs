//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health            - Liveness check
//! GET    /health/ready      - Readiness check (database ping)
//!
//! # Catalog
//! GET    /api/products      - Product listing with live stock (no auth)
//!
//! # Cart (session-scoped)
//! GET    /api/cart          - Current cart mapping
//! POST   /api/cart          - Add/remove quantity {pid, qty}
//! DELETE /api/cart          - Clear the cart
//!
//! # Orders
//! POST   /api/orders        - Place an order {name, address, phone}
//! GET    /api/orders        - List orders, newest first (admin)
//! PUT    /api/orders?id&status - Set order status (admin)
//! DELETE /api/orders?id     - Delete an order (admin)
//!
//! # Auth
//! GET    /api/auth          - Current admin flag
//! POST   /api/auth          - Verify password {password}, grant flag
//! ```

pub mod api;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(api::products::list))
        .route(
            "/api/cart",
            get(api::cart::show).post(api::cart::add).delete(api::cart::clear),
        )
        .route(
            "/api/orders",
            post(api::orders::create)
                .get(api::orders::list)
                .put(api::orders::update_status)
                .delete(api::orders::remove),
        )
        .route("/api/auth", get(api::auth::show).post(api::auth::login))
}
