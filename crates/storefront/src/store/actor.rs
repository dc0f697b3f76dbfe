//! # Product Store Task
//!
//! [`ProductStore`] owns the session's product list and selection. It runs in
//! its own Tokio task and serves [`StoreRequest`]s one at a time, so at most one
//! catalog call is ever in flight per store and a write is always finished
//! before the refresh that follows it is issued.

use super::error::StoreError;
use super::message::StoreRequest;
use super::state::{LoadState, StoreSnapshot};
use crate::clients::StoreClient;
use catalog_client::{Catalog, CatalogError, Product, ProductDraft, ProductId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The store task: owns the state, reads requests, talks to the catalog.
///
/// **Concurrency Model**:
/// Requests from every [`StoreClient`] clone funnel into one channel and are
/// handled sequentially. A second write issued while one is in flight waits in
/// the channel until the first write and its refresh are done. No lock guards
/// the state because nothing outside this task can reach it; observers get
/// copies through a `watch` channel.
///
/// Selection is the one exception: it involves no catalog call, so clients
/// write it straight into the shared state instead of queueing behind I/O.
///
/// **Liveness**:
/// A caller that gives up on a request does not cancel it. The catalog call
/// completes, the store applies the result to its own state, and the reply is
/// discarded. When the last client is dropped, the loop drains and exits.
pub struct ProductStore<C: Catalog> {
    receiver: mpsc::Receiver<StoreRequest>,
    catalog: C,
    state: Arc<watch::Sender<StoreSnapshot>>,
}

impl<C: Catalog + 'static> ProductStore<C> {
    /// Creates the store and the client used to talk to it.
    ///
    /// `buffer_size` bounds how many requests may queue while one is served.
    /// A size of zero is raised to one.
    pub fn new(catalog: C, buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (state, _) = watch::channel(StoreSnapshot::default());
        let state = Arc::new(state);
        let store = Self {
            receiver,
            catalog,
            state: state.clone(),
        };
        (store, StoreClient::new(sender, state))
    }

    /// Runs the request loop until every client is gone.
    pub async fn run(mut self) {
        info!("Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Refresh { respond_to } => {
                    let result = self.refresh().await.map_err(StoreError::from);
                    let _ = respond_to.send(result);
                }
                StoreRequest::Create { draft, respond_to } => {
                    let _ = respond_to.send(self.create(draft).await);
                }
                StoreRequest::Update {
                    id,
                    draft,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update(id, draft).await);
                }
                StoreRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(id).await);
                }
                StoreRequest::Submit {
                    draft,
                    editing,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.submit(draft, editing).await);
                }
            }
        }

        info!(size = self.state.borrow().products.len(), "Shutdown");
    }

    /// Replaces the product list with the catalog's current one.
    ///
    /// On failure the previous list stays in place. `loading` is reset on every
    /// exit path by [`LoadingGuard`].
    async fn refresh(&self) -> Result<Vec<Product>, CatalogError> {
        let _loading = LoadingGuard::start(&self.state);
        debug!("Refresh");

        match self.catalog.list().await {
            Ok(products) => {
                info!(size = products.len(), "Refreshed");
                self.state.send_modify(|s| {
                    // A selection follows its product's latest record and is
                    // dropped once the product is gone.
                    s.selected = s
                        .selected
                        .as_ref()
                        .and_then(|sel| products.iter().find(|p| p.id == sel.id))
                        .cloned();
                    s.products = products.clone();
                    s.load_state = LoadState::Loaded;
                    s.error = None;
                });
                Ok(products)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed");
                self.state.send_modify(|s| {
                    if s.load_state != LoadState::Loaded {
                        s.load_state = LoadState::Failed(e.clone());
                    }
                    s.error = Some(e.clone());
                });
                Err(e)
            }
        }
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        debug!(?draft, "Create");
        let created = self
            .catalog
            .create(&draft)
            .await
            .map_err(|e| self.surface("create", e))?;
        info!(id = %created.id, "Created");

        self.reload_after_write().await;
        Ok(created)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError> {
        if id != draft.id {
            warn!(%id, draft_id = %draft.id, "Update id mismatch");
            return Err(StoreError::IdMismatch {
                path: id,
                draft: draft.id,
            });
        }
        debug!(%id, ?draft, "Update");
        let updated = self
            .catalog
            .update(&id, &draft)
            .await
            .map_err(|e| self.surface("update", e))?;
        info!(%id, "Updated");

        self.state.send_modify(|s| s.selected = None);
        self.reload_after_write().await;
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        debug!(%id, "Delete");
        self.catalog
            .delete(&id)
            .await
            .map_err(|e| self.surface("delete", e))?;
        info!(%id, "Deleted");

        self.state.send_modify(|s| {
            if s.is_selected(&id) {
                s.selected = None;
            }
        });
        self.reload_after_write().await;
        Ok(())
    }

    async fn submit(
        &self,
        draft: ProductDraft,
        editing: Option<ProductId>,
    ) -> Result<Product, StoreError> {
        let selected = self.state.borrow().selected.as_ref().map(|p| p.id.clone());
        if editing != selected {
            warn!(?editing, ?selected, "Submit from stale form");
            return Err(StoreError::SelectionChanged);
        }
        match selected {
            Some(id) => self.update(id, draft).await,
            None => self.create(draft).await,
        }
    }

    async fn reload_after_write(&self) {
        // The write itself succeeded; a failed reload is already logged and
        // recorded in the snapshot.
        let _ = self.refresh().await;
    }

    /// Logs a failed write and records it for observers. State is otherwise untouched.
    fn surface(&self, operation: &'static str, error: CatalogError) -> StoreError {
        warn!(operation, error = %error, "Catalog call failed");
        self.state.send_modify(|s| s.error = Some(error.clone()));
        StoreError::Catalog(error)
    }
}

/// Holds `loading` up for as long as it lives.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<StoreSnapshot>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<StoreSnapshot>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormField, ProductForm};
    use catalog_client::mock::{
        create_mock_catalog, expect_create, expect_delete, expect_list, expect_update,
    };
    use tokio::sync::mpsc::error::TryRecvError;

    fn pen() -> Product {
        Product::new("1", "Pen", 2.0, 100)
    }

    fn mug() -> Product {
        Product::new("2", "Mug", 9.0, 10)
    }

    #[tokio::test]
    async fn test_loading_is_raised_while_list_is_pending() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        let refresh_task = tokio::spawn({
            let client = client.clone();
            async move { client.refresh().await }
        });

        let responder = expect_list(&mut requests)
            .await
            .expect("Expected List request");
        assert!(client.snapshot().loading);
        assert_eq!(client.snapshot().load_state, LoadState::NotLoaded);

        responder.send(Ok(vec![pen()])).unwrap();
        let products = refresh_task.await.unwrap().unwrap();

        assert_eq!(products, vec![pen()]);
        let snapshot = client.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.products, vec![pen()]);
        assert_eq!(snapshot.load_state, LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_refresh_is_issued_only_after_write_completes() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        let create_task = tokio::spawn({
            let client = client.clone();
            async move { client.create(mug().to_draft()).await }
        });

        let (draft, responder) = expect_create(&mut requests)
            .await
            .expect("Expected Create request");
        tokio::task::yield_now().await;
        assert!(matches!(requests.try_recv(), Err(TryRecvError::Empty)));

        responder.send(Ok(Product::from(draft))).unwrap();
        let list = expect_list(&mut requests)
            .await
            .expect("Expected List request after Create");
        list.send(Ok(vec![pen(), mug()])).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), mug());
        assert_eq!(client.snapshot().products.len(), 2);
    }

    #[tokio::test]
    async fn test_second_write_waits_for_first() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        let first = tokio::spawn({
            let client = client.clone();
            async move { client.delete(ProductId::from("1")).await }
        });
        let (id, responder) = expect_delete(&mut requests)
            .await
            .expect("Expected first Delete");
        assert_eq!(id, ProductId::from("1"));

        let second = tokio::spawn({
            let client = client.clone();
            async move { client.delete(ProductId::from("1")).await }
        });
        tokio::task::yield_now().await;
        assert!(matches!(requests.try_recv(), Err(TryRecvError::Empty)));

        responder.send(Ok(())).unwrap();
        expect_list(&mut requests)
            .await
            .expect("Expected List after first Delete")
            .send(Ok(vec![mug()]))
            .unwrap();
        first.await.unwrap().unwrap();

        let (_, responder) = expect_delete(&mut requests)
            .await
            .expect("Expected second Delete");
        responder
            .send(Err(CatalogError::Service {
                status: 404,
                body: "gone".into(),
            }))
            .unwrap();

        let result = second.await.unwrap();
        assert!(matches!(result, Err(StoreError::Catalog(ref e)) if e.is_not_found()));
        assert_eq!(client.snapshot().products, vec![mug()]);
    }

    #[tokio::test]
    async fn test_submit_routes_on_selection() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        client.select(Some(pen()));
        let mut form = client.form();
        assert!(form.is_edit());
        form.set(FormField::Name, "Fountain Pen");

        let submit_task = tokio::spawn({
            let client = client.clone();
            async move { client.submit(&form).await }
        });

        let (id, draft, responder) = expect_update(&mut requests)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId::from("1"));
        assert_eq!(draft.name, "Fountain Pen");
        responder.send(Ok(Product::from(draft.clone()))).unwrap();
        expect_list(&mut requests)
            .await
            .expect("Expected List request")
            .send(Ok(vec![Product::from(draft)]))
            .unwrap();

        submit_task.await.unwrap().unwrap();
        assert_eq!(client.snapshot().selected, None);
        assert!(!client.form().is_edit());
    }

    #[tokio::test]
    async fn test_submit_rejects_edited_id() {
        let (catalog, _requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        client.select(Some(pen()));
        let mut form = client.form();
        form.set(FormField::Id, "99");

        let result = client.submit(&form).await;
        assert_eq!(
            result,
            Err(StoreError::IdMismatch {
                path: ProductId::from("1"),
                draft: ProductId::from("99"),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_rejects_stale_form() {
        let (catalog, _requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        client.select(Some(pen()));
        let form = client.form();
        client.select(None);

        assert_eq!(client.submit(&form).await, Err(StoreError::SelectionChanged));

        let blank = ProductForm::blank();
        assert!(matches!(
            client.submit(&blank).await,
            Err(StoreError::Form(_))
        ));
    }

    #[tokio::test]
    async fn test_late_response_after_caller_left() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        let handle = tokio::spawn(store.run());
        let watcher = client.subscribe();

        let refresh_task = tokio::spawn(async move { client.refresh().await });
        let responder = expect_list(&mut requests)
            .await
            .expect("Expected List request");

        refresh_task.abort();
        let _ = refresh_task.await;

        responder.send(Ok(vec![pen()])).unwrap();
        handle.await.unwrap();

        let snapshot = watcher.borrow().clone();
        assert_eq!(snapshot.products, vec![pen()]);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_select_applies_while_list_is_pending() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 8);
        tokio::spawn(store.run());

        let refresh_task = tokio::spawn({
            let client = client.clone();
            async move { client.refresh().await }
        });
        let responder = expect_list(&mut requests)
            .await
            .expect("Expected List request");

        client.select(Some(pen()));
        let snapshot = client.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.selected, Some(pen()));
        assert!(client.form().is_edit());

        let repriced = Product::new("1", "Pen", 3.0, 100);
        responder.send(Ok(vec![repriced.clone(), mug()])).unwrap();
        refresh_task.await.unwrap().unwrap();

        // The selection now carries the refreshed record.
        assert_eq!(client.snapshot().selected, Some(repriced));
        assert_eq!(client.form().price, "3");
    }

    #[tokio::test]
    async fn test_zero_buffer_size_is_usable() {
        let (catalog, mut requests) = create_mock_catalog(8);
        let (store, client) = ProductStore::new(catalog, 0);
        tokio::spawn(store.run());

        let refresh_task = tokio::spawn(async move { client.refresh().await });
        expect_list(&mut requests)
            .await
            .expect("Expected List request")
            .send(Ok(vec![pen()]))
            .unwrap();
        assert_eq!(refresh_task.await.unwrap().unwrap(), vec![pen()]);
    }
}
