//! Session-related types.
//!
//! The session is an opaque per-visitor key-value store; these are the keys
//! the storefront uses in it.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart mapping.
    pub const CART: &str = "cart";

    /// Key for the admin capability flag, set after password verification.
    pub const ADMIN: &str = "admin";
}
