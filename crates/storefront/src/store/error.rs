//! Error types for the product store.

use crate::form::FormError;
use catalog_client::{CatalogError, ProductId};
use thiserror::Error;

/// Errors returned by [`StoreClient`](crate::clients::StoreClient) operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The catalog call behind the operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The submitted form could not be turned into a draft.
    #[error("Invalid form: {0}")]
    Form(#[from] FormError),

    /// An update addressed one product with another product's draft.
    #[error("Product id mismatch: path {path}, draft {draft}")]
    IdMismatch { path: ProductId, draft: ProductId },

    /// The form was opened for a different selection than the current one.
    #[error("Selection changed since the form was opened")]
    SelectionChanged,

    /// The store task is gone and no longer accepts requests.
    #[error("Store closed")]
    StoreClosed,

    /// The store task dropped the request without answering.
    #[error("Store dropped response channel")]
    StoreDropped,
}
