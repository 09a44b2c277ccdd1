//! Cart API routes.
//!
//! The cart lives in the session; handlers load it, mutate through the cart
//! service, and save it back. `session.save()` is implicit on response.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use oraya_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::{Cart, session_keys};
use crate::services::CartService;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to empty.
pub(super) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart in the session.
pub(super) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub pid: ProductId,
    pub qty: i64,
}

/// Show the current cart mapping.
///
/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<Cart>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart))
}

/// Add `qty` (possibly negative) of a product to the cart.
///
/// POST /api/cart
///
/// Returns the updated mapping. `404` for an unknown product, `400` when the
/// cumulative requested quantity exceeds current stock.
#[instrument(skip(state, session, req))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    req: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<Cart>> {
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut cart = load_cart(&session).await?;

    CartService::new(state.pool())
        .add(&mut cart, &req.pid, req.qty)
        .await?;

    save_cart(&session, &cart).await?;
    Ok(Json(cart))
}

/// Clear the cart.
///
/// DELETE /api/cart
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<Cart>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Json(cart))
}
