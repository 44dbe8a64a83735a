//! Checkout session creation.
//!
//! An incoming [`CheckoutOrder`] is validated and combined with the active
//! [`CheckoutProfile`] into a provider-neutral [`SessionRequest`], which a
//! [`CheckoutGateway`] turns into a hosted payment page URL.

pub mod profile;
pub mod stripe;

use std::env;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::catalog::RawPrice;

pub use profile::{CheckoutProfile, CustomField, FieldSet, ProfileError, ShippingOption};
pub use stripe::StripeCheckout;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Order details posted by the storefront.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutOrder {
    /// Numeric strings are accepted; text that is not a number reads as no
    /// price at all.
    #[serde(default, deserialize_with = "deserialize_order_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub width: Option<Measure>,
    #[serde(default)]
    pub height: Option<Measure>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A dimension as sent by the price calculator: a number or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Number(n) => write!(f, "{n}"),
            Measure::Text(s) => f.write_str(s),
        }
    }
}

fn deserialize_order_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawPrice>::deserialize(deserializer)?.and_then(|raw| raw.value()))
}

/// Order validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("price is missing or not positive")]
    InvalidPrice,
}

/// Errors from the payment service.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Payment service secret key is not configured")]
    MissingCredential,

    #[error("Payment service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Payment service request failed: {0}")]
    Transport(String),
}

/// Everything the payment service needs to open a checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    /// Price in minor currency units (grosze for PLN).
    pub amount_minor: i64,
    pub currency: String,
    pub product_name: String,
    pub description: Option<String>,
    pub payment_method_types: Vec<String>,
    pub collect_phone: bool,
    /// Countries accepted for the shipping address; empty disables collection.
    pub shipping_countries: Vec<String>,
    pub shipping_options: Vec<ShippingOption>,
    pub custom_fields: Vec<CustomField>,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub url: String,
}

/// Opens hosted checkout sessions with a payment provider.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_session(&self, request: &SessionRequest)
    -> Result<CheckoutSession, SessionError>;
}

/// Validates `order` and builds the session request for `profile`.
///
/// `origin` is the storefront base URL (scheme + host) used for the success
/// and cancel redirects.
pub fn prepare_session(
    order: &CheckoutOrder,
    profile: &CheckoutProfile,
    origin: &str,
) -> Result<SessionRequest, CheckoutError> {
    let price = order
        .price
        .filter(|p| *p > 0.0 && p.is_finite())
        .ok_or(CheckoutError::InvalidPrice)?;

    let origin = origin.trim_end_matches('/');

    Ok(SessionRequest {
        amount_minor: (price * 100.0).round() as i64,
        currency: profile.currency.clone(),
        product_name: profile.product_name_for(order),
        description: profile.describe(order),
        payment_method_types: profile.payment_method_types.clone(),
        collect_phone: profile.fields.collect_phone,
        shipping_countries: profile.shipping_countries(),
        shipping_options: profile.shipping_options.clone(),
        custom_fields: profile.fields.custom_fields.clone(),
        success_url: format!("{origin}/success.html?session_id={{CHECKOUT_SESSION_ID}}"),
        cancel_url: format!("{origin}/"),
    })
}

/// Payment service connection settings.
#[derive(Debug, Clone)]
pub struct StripeSettings {
    pub secret_key: Option<String>,
    pub api_base: String,
}

impl Default for StripeSettings {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base: DEFAULT_STRIPE_API_BASE.to_string(),
        }
    }
}

impl StripeSettings {
    /// Reads `STRIPE_SECRET_KEY` and `STRIPE_API_BASE`.
    pub fn from_env() -> Self {
        Self {
            secret_key: env::var("STRIPE_SECRET_KEY").ok().filter(|k| !k.is_empty()),
            api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.into()),
        }
    }
}
