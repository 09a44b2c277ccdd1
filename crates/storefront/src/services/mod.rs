//! Business services layered over the repositories.

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{AdminAuthService, AuthError};
pub use cart::{CartError, CartService};
pub use checkout::{CheckoutError, CheckoutService, CustomerDetails, DELIVERY_FEE};
