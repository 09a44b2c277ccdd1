//! Middleware for sessions and admin gating.

pub mod auth;
pub mod session;

pub use auth::RequireAdmin;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
