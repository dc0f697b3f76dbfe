//! # Catalog Model
//!
//! The single entity exchanged with the catalog service, plus the write payload
//! used by create and update requests.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Operator-chosen identifier of a [`Product`].
///
/// Ids are assigned by whoever creates the product, never by the service, and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product as stored by the catalog service.
///
/// `price` and `quantity` are expected to be non-negative but nothing on the
/// client side enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Operator-chosen identifier
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `quantity` - Available stock quantity
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Checks the parts of the schema serde alone cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().is_empty() {
            return Err("product id is empty".to_string());
        }
        if self.name.is_empty() {
            return Err(format!("product {} has an empty name", self.id));
        }
        Ok(())
    }

    /// The draft that would recreate this product as-is.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Write payload for create and update requests.
///
/// Serializes to the same JSON shape as [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl ProductDraft {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }
}

impl From<ProductDraft> for Product {
    fn from(draft: ProductDraft) -> Self {
        Self {
            id: draft.id,
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
        }
    }
}
