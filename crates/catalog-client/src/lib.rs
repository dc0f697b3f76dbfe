//! # Catalog Client
//!
//! The stateless request layer between a storefront and its remote product
//! catalog. It turns four intents (list, create, update, delete) into requests
//! against a configured base endpoint and hands back validated [`Product`]s.
//!
//! ## Design
//!
//! - **One seam**: everything that talks to a catalog goes through the
//!   [`Catalog`] trait. [`HttpCatalog`] is the production implementation;
//!   [`mock`] provides in-memory and channel-driven doubles.
//! - **No state**: no cache, no retries, no batching. Each call is a single
//!   request and calls do not serialize with each other. Sequencing is the
//!   caller's job.
//! - **Honest failures**: a non-success status is a [`CatalogError::Service`],
//!   never a body decoded as if it were a product. Bodies are validated
//!   against the product schema and rejected as [`CatalogError::Decode`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_client::{Catalog, HttpCatalog, ProductDraft};
//! use std::time::Duration;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catalog_client::CatalogError> {
//!     let base = Url::parse("http://localhost:3000").expect("static url");
//!     let catalog = HttpCatalog::new(base, Duration::from_secs(30))?;
//!
//!     catalog.create(&ProductDraft::new("2", "Mug", 9.0, 10)).await?;
//!     for product in catalog.list().await? {
//!         println!("{} {}", product.id, product.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod http;
pub mod mock;
pub mod model;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use http::HttpCatalog;
pub use model::{Product, ProductDraft, ProductId};
