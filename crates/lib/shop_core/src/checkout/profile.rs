//! Declarative checkout profiles.
//!
//! A profile describes what the hosted checkout page sells and which extra
//! fields it collects. The storefront's checkout variants (made-to-measure
//! glass pane with parcel-locker delivery, plain named product) are presets;
//! other variants can be loaded from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CheckoutOrder;

/// Errors raised while resolving a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Unknown checkout profile '{0}' (expected a preset name or a JSON file)")]
    Unknown(String),

    #[error("Failed to read checkout profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid checkout profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Extra information collected on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSet {
    pub collect_phone: bool,
    pub collect_address: bool,
    pub custom_fields: Vec<CustomField>,
}

/// A free-text field shown on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub optional: bool,
}

/// A fixed-price delivery option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub display_name: String,
    /// Cost in minor currency units.
    #[serde(default)]
    pub amount_minor: i64,
    pub min_business_days: u32,
    pub max_business_days: u32,
}

/// What is sold and what is collected at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutProfile {
    /// Line item name, unless [`name_from_order`](Self::name_from_order)
    /// applies.
    pub product_name: String,
    /// Use the order's `name` field as the line item name when present.
    #[serde(default)]
    pub name_from_order: bool,
    /// Line item description; `{width}`, `{height}` and `{name}` are
    /// substituted from the order.
    #[serde(default)]
    pub description_template: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_payment_method_types")]
    pub payment_method_types: Vec<String>,
    #[serde(default)]
    pub fields: FieldSet,
    /// Shipping countries when `fields.collect_address` is set.
    #[serde(default = "default_countries")]
    pub allowed_countries: Vec<String>,
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
}

fn default_currency() -> String {
    "pln".to_string()
}

fn default_payment_method_types() -> Vec<String> {
    vec!["card".to_string()]
}

fn default_countries() -> Vec<String> {
    vec!["PL".to_string()]
}

impl CheckoutProfile {
    pub const GLASS_PANE: &'static str = "glass-pane";
    pub const MINIMAL: &'static str = "minimal";

    /// Made-to-measure glass pane: card or BLIK, shipping address in Poland,
    /// free delivery to an InPost parcel locker.
    pub fn glass_pane() -> Self {
        Self {
            product_name: "Szyba na wymiar".to_string(),
            name_from_order: false,
            description_template: Some(
                "Zamówienie na szybę o wymiarach {height}cm x {width}cm".to_string(),
            ),
            currency: default_currency(),
            payment_method_types: vec!["card".to_string(), "blik".to_string()],
            fields: FieldSet {
                collect_phone: false,
                collect_address: true,
                custom_fields: Vec::new(),
            },
            allowed_countries: default_countries(),
            shipping_options: vec![ShippingOption {
                display_name: "Dostawa do Paczkomatu InPost".to_string(),
                amount_minor: 0,
                min_business_days: 1,
                max_business_days: 3,
            }],
        }
    }

    /// A single named product paid by card, nothing else collected.
    pub fn minimal() -> Self {
        Self {
            product_name: "Zamówienie".to_string(),
            name_from_order: true,
            description_template: None,
            currency: default_currency(),
            payment_method_types: default_payment_method_types(),
            fields: FieldSet::default(),
            allowed_countries: default_countries(),
            shipping_options: Vec::new(),
        }
    }

    /// Resolves a preset name, or reads a JSON profile from the given path.
    pub fn resolve(name_or_path: &str) -> Result<Self, ProfileError> {
        match name_or_path {
            Self::GLASS_PANE => Ok(Self::glass_pane()),
            Self::MINIMAL => Ok(Self::minimal()),
            other if other.ends_with(".json") => Self::load(other),
            other => Err(ProfileError::Unknown(other.to_string())),
        }
    }

    /// Reads a JSON profile file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn product_name_for(&self, order: &CheckoutOrder) -> String {
        order
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| self.name_from_order && !name.is_empty())
            .unwrap_or(&self.product_name)
            .to_string()
    }

    pub(crate) fn describe(&self, order: &CheckoutOrder) -> Option<String> {
        let template = self.description_template.as_deref()?;
        let field = |value: Option<String>| value.unwrap_or_else(|| "?".to_string());
        Some(
            template
                .replace("{width}", &field(order.width.as_ref().map(ToString::to_string)))
                .replace("{height}", &field(order.height.as_ref().map(ToString::to_string)))
                .replace("{name}", &field(order.name.clone())),
        )
    }

    pub(crate) fn shipping_countries(&self) -> Vec<String> {
        if self.fields.collect_address {
            self.allowed_countries.clone()
        } else {
            Vec::new()
        }
    }
}
