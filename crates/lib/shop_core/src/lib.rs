//! # shop_core
//!
//! Domain logic for the storefront: product catalog, retrieval-augmented
//! prompt building, and the gateways to the completion and payment services.

pub mod catalog;
pub mod checkout;
pub mod completion;
pub mod conversation;
pub mod prompt;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
