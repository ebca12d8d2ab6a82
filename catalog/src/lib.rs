//! Storefront Catalog
//!
//! Access to the product catalog backend: the service abstraction, its gRPC
//! and mock implementations, and the fetcher used by the gateway.

pub mod error;
pub mod fetcher;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use fetcher::CatalogFetcher;
pub use service::{CatalogService, RemoteCatalogService};

#[cfg(any(test, feature = "test-utils"))]
pub use service::MockCatalogService;
