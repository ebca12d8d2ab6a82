//! Catalog fetcher.

use std::sync::Arc;

use storefront_common::Product;
use tracing::{debug, instrument};

use crate::error::CatalogResult;
use crate::service::CatalogService;

/// Reads the full product list from the catalog backend.
///
/// Nothing is cached: every call goes to the backend, and the backend's
/// ordering is returned untouched.
#[derive(Clone)]
pub struct CatalogFetcher {
    service: Arc<dyn CatalogService>,
}

impl CatalogFetcher {
    /// Create a new fetcher backed by `service`.
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self { service }
    }

    /// Fetch every product.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self.service.list_products().await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }
}
