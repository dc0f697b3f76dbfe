//! # Catalog Test Doubles
//!
//! Two doubles implement [`Catalog`] without touching the network.
//!
//! | Double | Drives responses | Use Case |
//! |--------|------------------|----------|
//! | [`InMemoryCatalog`] | A real in-memory product table | Behaviour of code *using* the catalog (round trips, counts, failures) |
//! | [`MockCatalog`] | The test, one request at a time | Ordering and in-flight state (what is sent when, what is observable mid-request) |
//!
//! ## InMemoryCatalog
//!
//! Behaves like a well-mannered catalog service: duplicate ids on create are
//! rejected with status 409, unknown ids on update or delete with 404. Any call
//! can be made to fail once with [`InMemoryCatalog::fail_next`], and every call
//! is recorded for later inspection.
//!
//! ```rust
//! use catalog_client::{Catalog, CatalogError};
//! use catalog_client::mock::{CatalogOp, InMemoryCatalog};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = InMemoryCatalog::new();
//!     catalog.fail_next(CatalogOp::List, CatalogError::Transport("offline".into()));
//!
//!     assert!(catalog.list().await.is_err());
//!     assert!(catalog.list().await.unwrap().is_empty());
//! }
//! ```
//!
//! ## MockCatalog
//!
//! Every call becomes a [`CatalogRequest`] on a channel the test owns. The call
//! stays pending until the test answers through the request's responder, which
//! makes it possible to assert on state while a request is in flight.
//!
//! ```rust
//! use catalog_client::{Catalog, Product};
//! use catalog_client::mock::{create_mock_catalog, expect_list};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (catalog, mut requests) = create_mock_catalog(8);
//!     let call = tokio::spawn(async move { catalog.list().await });
//!
//!     let respond_to = expect_list(&mut requests).await.expect("Expected List request");
//!     respond_to.send(Ok(vec![Product::new("1", "Pen", 2.0, 100)])).unwrap();
//!
//!     assert_eq!(call.await.unwrap().unwrap().len(), 1);
//! }
//! ```

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// IN-MEMORY CATALOG
// =============================================================================

/// The kind of catalog call, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    List,
    Create,
    Update,
    Delete,
}

/// A recorded catalog call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    List,
    Create(ProductId),
    Update(ProductId),
    Delete(ProductId),
}

#[derive(Debug, Default)]
struct InMemoryState {
    products: Vec<Product>,
    calls: Vec<CatalogCall>,
    failures: HashMap<CatalogOp, VecDeque<CatalogError>>,
}

impl InMemoryState {
    fn take_failure(&mut self, op: CatalogOp) -> CatalogResult<()> {
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }
}

/// An in-memory stand-in for the catalog service.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: Mutex<InMemoryState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `products` already stored.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        catalog.lock().products = products.into_iter().collect();
        catalog
    }

    /// Makes the next call of kind `op` fail with `error`. Failures queue up.
    pub fn fail_next(&self, op: CatalogOp, error: CatalogError) {
        self.lock().failures.entry(op).or_default().push_back(error);
    }

    /// Current contents, in insertion order.
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Every call received so far, failed ones included.
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: &ProductId) -> CatalogError {
    CatalogError::Service {
        status: 404,
        body: format!("product {id} not found"),
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::List);
        state.take_failure(CatalogOp::List)?;
        Ok(state.products.clone())
    }

    async fn create(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::Create(draft.id.clone()));
        state.take_failure(CatalogOp::Create)?;
        if state.position(&draft.id).is_some() {
            return Err(CatalogError::Service {
                status: 409,
                body: format!("product {} already exists", draft.id),
            });
        }
        let product = Product::from(draft.clone());
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::Update(id.clone()));
        state.take_failure(CatalogOp::Update)?;
        let index = state.position(id).ok_or_else(|| not_found(id))?;
        // The path addresses the record; the stored id never changes.
        let product = Product {
            id: id.clone(),
            ..Product::from(draft.clone())
        };
        state.products[index] = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        let mut state = self.lock();
        state.calls.push(CatalogCall::Delete(id.clone()));
        state.take_failure(CatalogOp::Delete)?;
        let index = state.position(id).ok_or_else(|| not_found(id))?;
        state.products.remove(index);
        Ok(())
    }
}

// =============================================================================
// CHANNEL-DRIVEN MOCK
// =============================================================================

/// One-shot channel the test answers a pending call through.
pub type Responder<T> = oneshot::Sender<CatalogResult<T>>;

/// A catalog call waiting for the test to answer it.
#[derive(Debug)]
pub enum CatalogRequest {
    List {
        respond_to: Responder<Vec<Product>>,
    },
    Create {
        draft: ProductDraft,
        respond_to: Responder<Product>,
    },
    Update {
        id: ProductId,
        draft: ProductDraft,
        respond_to: Responder<Product>,
    },
    Delete {
        id: ProductId,
        respond_to: Responder<()>,
    },
}

/// A [`Catalog`] whose every call is forwarded to the test.
///
/// If the test drops the receiver or a responder, the call fails with
/// [`CatalogError::Transport`].
#[derive(Debug, Clone)]
pub struct MockCatalog {
    sender: mpsc::Sender<CatalogRequest>,
}

impl MockCatalog {
    async fn call<T>(
        &self,
        make: impl FnOnce(Responder<T>) -> CatalogRequest,
    ) -> CatalogResult<T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| CatalogError::Transport("mock catalog closed".to_string()))?;
        response
            .await
            .map_err(|_| CatalogError::Transport("mock catalog dropped response".to_string()))?
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        self.call(|respond_to| CatalogRequest::List { respond_to }).await
    }

    async fn create(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        let draft = draft.clone();
        self.call(|respond_to| CatalogRequest::Create { draft, respond_to })
            .await
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product> {
        let (id, draft) = (id.clone(), draft.clone());
        self.call(|respond_to| CatalogRequest::Update {
            id,
            draft,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        let id = id.clone();
        self.call(|respond_to| CatalogRequest::Delete { id, respond_to })
            .await
    }
}

/// Creates a mock catalog and the receiver its calls arrive on.
pub fn create_mock_catalog(buffer_size: usize) -> (MockCatalog, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockCatalog { sender }, receiver)
}

/// Waits for the next request and returns its responder if it is a List.
pub async fn expect_list(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<Responder<Vec<Product>>> {
    match receiver.recv().await {
        Some(CatalogRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Create.
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductDraft, Responder<Product>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an Update.
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, ProductDraft, Responder<Product>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Update {
            id,
            draft,
            respond_to,
        }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Delete.
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, Responder<()>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
