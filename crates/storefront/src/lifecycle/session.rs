use crate::clients::StoreClient;
use crate::config::{ConfigError, StorefrontConfig};
use crate::store::ProductStore;
use catalog_client::{Catalog, CatalogError, HttpCatalog};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while opening a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One storefront session: a running product store and the client for it.
///
/// The session replaces any notion of a global product list. Whatever renders
/// the storefront is handed `session.store` (or clones of it) and the store
/// lives exactly as long as those handles do.
///
/// # Example
///
/// ```ignore
/// let session = Session::connect(&StorefrontConfig::from_env()?)?;
///
/// session.store.refresh().await?;
/// println!("{}", views::render_home(&session.store.snapshot()));
///
/// session.shutdown().await?;
/// ```
pub struct Session {
    /// Client for the session's product store.
    pub store: StoreClient,

    /// Task handle of the running store (used for graceful shutdown).
    handle: JoinHandle<()>,
}

impl Session {
    /// Opens a session against the HTTP catalog described by `config`.
    pub fn connect(config: &StorefrontConfig) -> Result<Self, SessionError> {
        let endpoint = config.endpoint()?;
        info!(%endpoint, "Connecting to catalog");
        let catalog = HttpCatalog::new(endpoint, config.timeout())?;
        Ok(Self::with_catalog(catalog, config.buffer_size))
    }

    /// Opens a session over any catalog implementation.
    pub fn with_catalog<C: Catalog + 'static>(catalog: C, buffer_size: usize) -> Self {
        let (store, client) = ProductStore::new(catalog, buffer_size);
        let handle = tokio::spawn(store.run());
        Self {
            store: client,
            handle,
        }
    }

    /// Closes the session and waits for the store task to finish.
    ///
    /// Dropping `store` closes the request channel; the task exits once it has
    /// served whatever was already queued. Clones of the client handed out
    /// earlier keep the store alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down session...");
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
