//! API server configuration.

use std::path::PathBuf;

use shop_core::checkout::{CheckoutProfile, StripeSettings};
use shop_core::completion::CompletionSettings;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CATALOG_PATH: &str = "produkty.json";
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_CHECKOUT_PROFILE: &str = CheckoutProfile::GLASS_PANE;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Product catalog JSON file, read once at startup.
    pub catalog_path: PathBuf,
    /// Storefront origin used for checkout redirects when the request has no
    /// usable `Origin` header.
    pub public_origin: String,
    /// Checkout profile preset name or path to a JSON profile.
    pub checkout_profile: String,
    /// Completion service settings.
    pub completion: CompletionSettings,
    /// Payment service settings.
    pub stripe: StripeSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            public_origin: DEFAULT_PUBLIC_ORIGIN.into(),
            checkout_profile: DEFAULT_CHECKOUT_PROFILE.into(),
            completion: CompletionSettings::default(),
            stripe: StripeSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                 |
    /// |--------------------|-------------------------|
    /// | `BIND_ADDR`        | `127.0.0.1:3000`        |
    /// | `CATALOG_PATH`     | `produkty.json`         |
    /// | `PUBLIC_ORIGIN`    | `http://localhost:3000` |
    /// | `CHECKOUT_PROFILE` | `glass-pane`            |
    ///
    /// Completion and payment settings come from
    /// [`CompletionSettings::from_env`] and [`StripeSettings::from_env`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            catalog_path: std::env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            public_origin: std::env::var("PUBLIC_ORIGIN").unwrap_or(defaults.public_origin),
            checkout_profile: std::env::var("CHECKOUT_PROFILE")
                .unwrap_or(defaults.checkout_profile),
            completion: CompletionSettings::from_env(),
            stripe: StripeSettings::from_env(),
        }
    }
}
