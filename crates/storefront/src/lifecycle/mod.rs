//! # Session Lifecycle
//!
//! Starting, wiring and stopping the pieces of a storefront session.
//!
//! **Key Responsibilities:**
//! 1. **Wiring** - Build the catalog client from configuration and hand it to a new store
//! 2. **Lifecycle Management** - Spawn the store task and own its handle
//! 3. **Graceful Shutdown** - Close the store's channel and wait for it to drain
//! 4. **Observability Setup** - Initialize tracing once per process
//!
//! ## The Session Pattern
//!
//! ```rust,ignore
//! setup_tracing();
//!
//! let session = Session::connect(&StorefrontConfig::from_env()?)?;
//! let admin_view = session.store.clone();
//! let home_view = session.store.clone();
//! // ... render, forward operator intents ...
//! drop((admin_view, home_view));
//! session.shutdown().await?;
//! ```
//!
//! Every view shares the one store of its session. Two sessions never share
//! product state.

pub mod session;
pub mod tracing;

pub use session::*;
pub use self::tracing::*;
