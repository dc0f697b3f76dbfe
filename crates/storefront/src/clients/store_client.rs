//! # Store Client
//!
//! The handle presentation code holds. It forwards operator intents to the
//! [`ProductStore`](crate::store::ProductStore) task and exposes the store's
//! observable state.
use crate::form::ProductForm;
use crate::store::{Response, StoreError, StoreRequest, StoreSnapshot};
use catalog_client::{Product, ProductDraft, ProductId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the product store.
///
/// * **Cloneable**: holds a request sender and the shared state, so clones are
///   cheap and can be handed to every view that needs the store.
/// * **Ordered**: requests from all clones are served one at a time, in the
///   order they reach the store.
/// * **Responsive**: [`select`](Self::select) never waits for a catalog call.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
    state: Arc<watch::Sender<StoreSnapshot>>,
}

impl StoreClient {
    pub fn new(
        sender: mpsc::Sender<StoreRequest>,
        state: Arc<watch::Sender<StoreSnapshot>>,
    ) -> Self {
        Self { sender, state }
    }

    /// Reloads the product list from the catalog.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<Product>, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Refresh { respond_to })
            .await
    }

    /// Creates a product, then reloads the list.
    #[instrument(skip(self, draft), fields(id = %draft.id))]
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Create { draft, respond_to })
            .await
    }

    /// Replaces the product addressed by `id`, clears the selection, then
    /// reloads the list. `draft.id` must equal `id`.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Update {
            id,
            draft,
            respond_to,
        })
        .await
    }

    /// Deletes a product, then reloads the list.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    /// Switches the form to edit mode for `product`, or back to create mode.
    ///
    /// Applied immediately, even while a catalog call is in flight. A form
    /// opened before the switch is refused on submit.
    pub fn select(&self, product: Option<Product>) {
        debug!(id = ?product.as_ref().map(|p| &p.id), "Select");
        self.state.send_modify(|s| s.selected = product);
    }

    /// Submits a form through the path shared by both flows.
    ///
    /// The form is validated here; the store then updates the selected product
    /// or creates a new one.
    #[instrument(skip(self, form), fields(edit = form.is_edit()))]
    pub async fn submit(&self, form: &ProductForm) -> Result<Product, StoreError> {
        let draft = form.validate()?;
        let editing = form.editing_id().cloned();
        debug!(?draft, "Sending request");
        self.request(|respond_to| StoreRequest::Submit {
            draft,
            editing,
            respond_to,
        })
        .await
    }

    /// A fresh form for the current mode: seeded from the selection, or blank.
    pub fn form(&self) -> ProductForm {
        match &self.state.borrow().selected {
            Some(product) => ProductForm::editing(product),
            None => ProductForm::blank(),
        }
    }

    /// Copy of the store's current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}
