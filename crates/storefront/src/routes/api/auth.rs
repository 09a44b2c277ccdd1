//! Admin auth API routes.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use super::SuccessResponse;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::services::AdminAuthService;
use crate::state::AppState;

/// Current admin flag for this session.
#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Report whether this session holds the admin flag.
///
/// GET /api/auth
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<AdminStatusResponse>> {
    let admin = session
        .get::<bool>(session_keys::ADMIN)
        .await?
        .unwrap_or(false);

    Ok(Json(AdminStatusResponse { admin }))
}

/// Verify the admin password and grant the session flag.
///
/// POST /api/auth
#[instrument(skip(state, session, req))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    req: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let valid = AdminAuthService::new(state.pool(), state.config())
        .verify_password(&req.password)
        .await?;

    if !valid {
        return Err(AppError::Unauthorized("Invalid password".to_owned()));
    }

    session.insert(session_keys::ADMIN, true).await?;
    Ok(Json(SuccessResponse::OK))
}
