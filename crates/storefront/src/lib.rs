//! # Storefront
//!
//! The storefront/admin client for a product catalog. The interesting part is
//! the product synchronization layer: a session-scoped store that owns the
//! product list, talks to the catalog through [`catalog_client`], and reloads
//! the full list after every write so the view never drifts from the service.
//!
//! ## Module Tour
//!
//! - **[`store`]**: [`ProductStore`](store::ProductStore), the task that owns
//!   product state and serializes every catalog call.
//! - **[`clients`]**: [`StoreClient`](clients::StoreClient), the cloneable handle
//!   views use to send intents and read [`StoreSnapshot`](store::StoreSnapshot)s.
//! - **[`form`]**: [`ProductForm`](form::ProductForm), the string-typed draft
//!   behind the create and edit forms.
//! - **[`lifecycle`]**: [`Session`](lifecycle::Session) wiring and tracing setup.
//! - **[`config`]**: environment configuration.
//! - **[`views`]**: text renderings of the home, admin and cart pages.
//!
//! ## Running
//!
//! ```bash
//! STOREFRONT_BASE_URL=http://localhost:3000 RUST_LOG=info cargo run -p storefront -- admin
//! ```

pub mod clients;
pub mod config;
pub mod form;
pub mod lifecycle;
pub mod store;
pub mod views;
