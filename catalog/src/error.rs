//! Catalog error types.

use storefront_common::BackendError;
use storefront_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur while reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog backend failed or could not be reached.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A product in the backend's answer could not be mapped.
    #[error("catalog returned an invalid product at position {position}")]
    InvalidProduct {
        position: usize,
        #[source]
        source: ProtocolError,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
