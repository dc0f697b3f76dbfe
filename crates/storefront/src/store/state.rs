//! Observable store state.

use catalog_client::{CatalogError, Product, ProductId};

/// Whether the product list has ever been loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// No list request has completed yet.
    #[default]
    NotLoaded,
    /// At least one list request succeeded; `products` is meaningful.
    Loaded,
    /// Every list request so far failed; nothing to show but the error.
    Failed(CatalogError),
}

/// Which flow the admin form is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// A point-in-time copy of everything the store exposes.
///
/// Presentation code renders from this and nothing else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub selected: Option<Product>,
    pub loading: bool,
    pub load_state: LoadState,
    /// Last failure surfaced by the store. Cleared by the next success.
    pub error: Option<CatalogError>,
}

impl StoreSnapshot {
    pub fn mode(&self) -> FormMode {
        match &self.selected {
            Some(product) => FormMode::Edit(product.id.clone()),
            None => FormMode::Create,
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn is_selected(&self, id: &ProductId) -> bool {
        self.selected.as_ref().is_some_and(|p| &p.id == id)
    }
}
