//! Admin gating middleware and extractors.
//!
//! The admin capability is a boolean session flag granted after password
//! verification - there is no separate identity.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor that requires the session admin flag.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_: RequireAdmin) -> impl IntoResponse {
///     // only reached with the admin flag set
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when the admin flag is missing.
pub struct AdminRejection;

#[derive(Serialize)]
struct RejectionBody {
    error: &'static str,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(RejectionBody {
                error: "Unauthorized",
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection)?;

        let is_admin = session
            .get::<bool>(session_keys::ADMIN)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if is_admin { Ok(Self) } else { Err(AdminRejection) }
    }
}
