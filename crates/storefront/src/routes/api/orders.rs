//! Order API routes.
//!
//! Placement is public (it consumes the session cart); listing, status
//! updates, and deletion require the admin flag.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use oraya_core::{OrderId, OrderStatus};

use super::SuccessResponse;
use super::cart::{load_cart, save_cart};
use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{Cart, Order};
use crate::middleware::RequireAdmin;
use crate::services::{CheckoutService, CustomerDetails};
use crate::state::AppState;

/// Response from a successful order placement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: OrderId,
    pub message: &'static str,
}

/// Place an order for the session cart.
///
/// POST /api/orders
///
/// On success the session cart is cleared; on any failure it is left
/// untouched so the shopper can adjust and retry.
#[instrument(skip(state, session, details))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    details: std::result::Result<Json<CustomerDetails>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>> {
    let Json(details) = details.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let cart = load_cart(&session).await?;

    let order_id = CheckoutService::new(state.pool())
        .place_order(&details, &cart)
        .await?;

    save_cart(&session, &Cart::new()).await?;

    Ok(Json(PlaceOrderResponse {
        order_id,
        message: "Order placed successfully",
    }))
}

/// List all orders, newest first.
///
/// GET /api/orders (admin)
#[instrument(skip(_admin, state))]
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Query parameters for status updates.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderParams {
    pub id: String,
    pub status: String,
}

/// Set the status of an order.
///
/// PUT /api/orders?id&status (admin)
///
/// The status must belong to the closed set; no transition ordering is
/// enforced between values.
#[instrument(skip(_admin, state))]
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<UpdateOrderParams>,
) -> Result<Json<SuccessResponse>> {
    let status = params
        .status
        .parse::<OrderStatus>()
        .map_err(AppError::BadRequest)?;

    OrderRepository::new(state.pool())
        .update_status(&OrderId::new(params.id), status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("order".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(SuccessResponse::OK))
}

/// Query parameters for order deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteOrderParams {
    pub id: String,
}

/// Delete an order.
///
/// DELETE /api/orders?id (admin)
#[instrument(skip(_admin, state))]
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<DeleteOrderParams>,
) -> Result<Json<SuccessResponse>> {
    OrderRepository::new(state.pool())
        .delete(&OrderId::new(params.id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("order".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(SuccessResponse::OK))
}
