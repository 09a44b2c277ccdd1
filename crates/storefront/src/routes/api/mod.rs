//! JSON API endpoints.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use serde::Serialize;

/// Standard success response for admin mutations.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(crate) const OK: Self = Self { success: true };
}
