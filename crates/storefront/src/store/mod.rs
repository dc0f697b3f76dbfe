//! # Product Store
//!
//! The authoritative, session-scoped copy of the catalog and the only place
//! product state is mutated.
//!
//! ## Structure
//!
//! - [`actor`] - [`ProductStore`], the task that owns the state
//! - [`message`] - [`StoreRequest`], what clients send it
//! - [`state`] - [`StoreSnapshot`], what observers see
//! - [`error`] - [`StoreError`]
//!
//! ## Refetch After Mutation
//!
//! The store never patches its list from a request payload. After every
//! successful create, update or delete it asks the catalog for the full list
//! again and replaces its copy wholesale, so the visible list always reflects
//! what the service actually holds.
//!
//! ## Usage
//!
//! ```rust
//! use catalog_client::ProductDraft;
//! use catalog_client::mock::InMemoryCatalog;
//! use storefront::store;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (store, client) = store::new(InMemoryCatalog::new());
//!     tokio::spawn(store.run());
//!
//!     client.create(ProductDraft::new("2", "Mug", 9.0, 10)).await?;
//!     assert_eq!(client.snapshot().products.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;
pub mod state;

pub use actor::*;
pub use error::*;
pub use message::*;
pub use state::*;

use crate::clients::StoreClient;
use catalog_client::Catalog;

/// Default request queue depth per store.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a store over `catalog` with the default queue depth.
pub fn new<C: Catalog + 'static>(catalog: C) -> (ProductStore<C>, StoreClient) {
    ProductStore::new(catalog, DEFAULT_BUFFER_SIZE)
}
