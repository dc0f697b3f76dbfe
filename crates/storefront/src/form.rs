//! # Product Form
//!
//! The draft behind the admin panel's product form. It holds exactly what the
//! operator typed, as strings, until [`ProductForm::validate`] turns it into a
//! typed [`ProductDraft`].
//!
//! The same form type backs both flows:
//!
//! ```rust
//! use catalog_client::Product;
//! use storefront::form::{FormField, ProductForm};
//!
//! // Create mode: everything starts empty.
//! let mut form = ProductForm::blank();
//! form.set(FormField::Id, "2");
//! form.set(FormField::Name, "Mug");
//! form.set(FormField::Price, "9");
//! form.set(FormField::Quantity, "10");
//! assert_eq!(form.submit_label(), "Create Product");
//! assert!(form.validate().is_ok());
//!
//! // Edit mode: seeded from an existing product.
//! let form = ProductForm::editing(&Product::new("1", "Pen", 2.0, 100));
//! assert_eq!(form.submit_label(), "Update Product");
//! ```

use catalog_client::{Product, ProductDraft, ProductId};
use std::fmt::Display;
use thiserror::Error;

/// The four inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Name,
    Price,
    Quantity,
}

impl Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FormField::Id => "id",
            FormField::Name => "name",
            FormField::Price => "price",
            FormField::Quantity => "quantity",
        })
    }
}

/// Reasons a form cannot be submitted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("Field {0} is required")]
    Missing(FormField),

    #[error("Field {field} is not a valid number: {value:?}")]
    InvalidNumber { field: FormField, value: String },
}

/// A form draft, owned by one open form for its lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
    editing: Option<ProductId>,
}

impl ProductForm {
    /// An empty create-mode form.
    pub fn blank() -> Self {
        Self::default()
    }

    /// An edit-mode form holding a copy of `product`.
    pub fn editing(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            editing: Some(product.id.clone()),
        }
    }

    /// The product being edited, if any.
    pub fn editing_id(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Product"
        } else {
            "Create Product"
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Id => self.id = value,
            FormField::Name => self.name = value,
            FormField::Price => self.price = value,
            FormField::Quantity => self.quantity = value,
        }
    }

    /// Checks every field and builds the typed draft.
    ///
    /// Fields are checked in form order, so the first problem reported is the
    /// topmost one. Text is trimmed, except an edited product's id, which must
    /// stay exactly as stored.
    pub fn validate(&self) -> Result<ProductDraft, FormError> {
        let mut id = required(FormField::Id, &self.id)?;
        if self.editing.is_some() {
            id = self.id.as_str();
        }
        let name = required(FormField::Name, &self.name)?;
        let price = required(FormField::Price, &self.price)?;
        let quantity = required(FormField::Quantity, &self.quantity)?;

        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| invalid(FormField::Price, price))?;
        let quantity = quantity
            .parse::<i64>()
            .map_err(|_| invalid(FormField::Quantity, quantity))?;

        Ok(ProductDraft::new(id, name, price, quantity))
    }
}

fn required(field: FormField, value: &str) -> Result<&str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(value)
    }
}

fn invalid(field: FormField, value: &str) -> FormError {
    FormError::InvalidNumber {
        field,
        value: value.to_string(),
    }
}
