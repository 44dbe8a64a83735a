//! Static product catalog.
//!
//! The catalog is read once at startup from a JSON array and shared read-only
//! for the lifetime of the process. Records may use either English keys
//! (`name`, `price`, `shortDescription`, `longDescription`) or the storefront's
//! Polish export keys (`nazwa`, `cena`, `opis_krotki`, `opis`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One product offered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, alias = "nazwa")]
    pub name: String,
    #[serde(alias = "cena", deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default, alias = "opis_krotki", skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(
        default,
        alias = "description",
        alias = "opis",
        skip_serializing_if = "Option::is_none"
    )]
    pub long_description: Option<String>,
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            short_description: None,
            long_description: None,
        }
    }

    pub fn with_short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = Some(text.into());
        self
    }

    pub fn with_long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = Some(text.into());
        self
    }

    /// Lower-cased name, long description and short description joined by a
    /// space. Absent fields are skipped.
    pub fn searchable_text(&self) -> String {
        [
            Some(self.name.as_str()),
            self.long_description.as_deref(),
            self.short_description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Short description if non-empty, otherwise the long one.
    pub fn best_description(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.long_description.as_deref().filter(|d| !d.is_empty()))
    }
}

/// A price as it appears in JSON: a number or, from some exports and forms, a
/// numeric string with either decimal separator.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    pub(crate) fn value(&self) -> Option<f64> {
        match self {
            RawPrice::Number(n) => Some(*n),
            RawPrice::Text(s) => s.trim().replace(',', ".").parse().ok(),
        }
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawPrice::deserialize(deserializer)?;
    raw.value()
        .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {raw:?}")))
}

/// Immutable, in-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Parses a JSON array of products. Records that fail to deserialize are
    /// skipped with a warning; a document that is not an array is an error.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut products = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<ProductRecord>(value) {
                Ok(product) => products.push(product),
                Err(e) => warn!(index, "skipping malformed catalog record: {e}"),
            }
        }

        Ok(Self { products })
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(path, &json)?;
        info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Like [`Catalog::load`], but a failure is logged and yields an empty
    /// catalog so the assistant keeps answering from its instructions alone.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("{e}; continuing with an empty catalog");
                Self::empty()
            }
        }
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
