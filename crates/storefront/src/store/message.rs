//! # Store Messages
//!
//! Requests sent from a [`StoreClient`](crate::clients::StoreClient) to the
//! [`ProductStore`](super::ProductStore) task. Each carries a one-shot channel
//! the store answers on once the operation, including its follow-up refresh,
//! has finished.

use super::error::StoreError;
use catalog_client::{Product, ProductDraft, ProductId};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    Refresh {
        respond_to: Response<Vec<Product>>,
    },
    Create {
        draft: ProductDraft,
        respond_to: Response<Product>,
    },
    Update {
        id: ProductId,
        draft: ProductDraft,
        respond_to: Response<Product>,
    },
    Delete {
        id: ProductId,
        respond_to: Response<()>,
    },
    /// Shared submit path: update when a product is selected, create otherwise.
    ///
    /// `editing` is the product the form was opened for, checked against the
    /// store's current selection.
    Submit {
        draft: ProductDraft,
        editing: Option<ProductId>,
        respond_to: Response<Product>,
    },
}
