//! # Catalog Trait
//!
//! The seam between the product store and whatever serves the catalog. The
//! HTTP implementation lives in [`http`](crate::http); test doubles live in
//! [`mock`](crate::mock).
use crate::error::CatalogResult;
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use std::sync::Arc;

/// The four catalog intents.
///
/// Implementations hold no product state. Every call is independent: no
/// retries, no batching, no caching.
///
/// # Example
///
/// ```rust
/// use catalog_client::{Catalog, ProductDraft};
/// use catalog_client::mock::InMemoryCatalog;
///
/// #[tokio::main]
/// async fn main() {
///     let catalog = InMemoryCatalog::new();
///     catalog.create(&ProductDraft::new("1", "Pen", 2.0, 100)).await.unwrap();
///
///     let products = catalog.list().await.unwrap();
///     assert_eq!(products.len(), 1);
/// }
/// ```
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the whole collection. An empty vector is a valid answer.
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    /// Create a product with the operator-chosen id carried in `draft`.
    async fn create(&self, draft: &ProductDraft) -> CatalogResult<Product>;

    /// Replace the product addressed by `id`.
    ///
    /// The caller is responsible for `id` matching `draft.id`.
    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product>;

    /// Remove the product addressed by `id`.
    async fn delete(&self, id: &ProductId) -> CatalogResult<()>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        (**self).list().await
    }

    async fn create(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        (**self).delete(id).await
    }
}
