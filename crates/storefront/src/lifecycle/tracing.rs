//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` formatter once for the
//! whole process. Both crates log through `tracing` with structured fields, so
//! a single filter controls everything.
//!
//! ## Configuration
//!
//! The format is compact and hides module paths (`with_target(false)`); the
//! span names (`refresh`, `create`, `delete`, ...) already say where a line
//! comes from.
//!
//! ```bash
//! # Writes and refreshes only
//! RUST_LOG=info storefront admin
//!
//! # Full drafts and request URLs
//! RUST_LOG=debug storefront create --id 2 --name Mug --price 9 --quantity 10
//!
//! # Just the HTTP layer
//! RUST_LOG=catalog_client=debug storefront home
//! ```
//!
//! ## Workflow Trace Example
//!
//! Creating a product with `RUST_LOG=debug`:
//!
//! ```text
//! DEBUG submit{edit=false}: Sending request draft=ProductDraft { id: ProductId("2"), name: "Mug", price: 9.0, quantity: 10 }
//! DEBUG Create draft=ProductDraft { id: ProductId("2"), ... }
//! DEBUG create{id=2}: POST url=http://localhost:3000/products draft=...
//!  INFO Created id=2
//! DEBUG Refresh
//! DEBUG list: GET url=http://localhost:3000/products
//!  INFO Refreshed size=2
//! ```
//!
//! The write always completes before `Refresh` starts; that order is
//! guaranteed by the store, and the trace makes it visible.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
