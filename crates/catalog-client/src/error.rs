//! # Catalog Errors
//!
//! Every failure a catalog call can produce. The variants carry plain strings
//! so the error can be cloned into published store state.

/// Errors returned by [`Catalog`](crate::Catalog) implementations.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CatalogError {
    /// The request could not be sent or no response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body does not match the product schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The service answered with a non-success status.
    #[error("Service error: status {status}: {body}")]
    Service { status: u16, body: String },

    /// The configured base URL cannot address the catalog.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl CatalogError {
    /// True when the service reported that the addressed product does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Service { status: 404, .. })
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
