//! Catalog backend trait and implementations.

use async_trait::async_trait;
use storefront_common::Product;
use storefront_protocol::messages::{self as pb, paths};
use storefront_protocol::UnaryClient;
use tracing::{debug, instrument};

use crate::error::{CatalogError, CatalogResult};

/// Capabilities the gateway needs from the catalog backend.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List every product, in the backend's order.
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;
}

/// Catalog backend reached over gRPC.
#[derive(Debug, Clone)]
pub struct RemoteCatalogService {
    client: UnaryClient,
}

impl RemoteCatalogService {
    /// Wrap an existing client.
    pub fn new(client: UnaryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogService for RemoteCatalogService {
    #[instrument(skip(self))]
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let response: pb::ListProductsResponse =
            self.client.unary(paths::LIST_PRODUCTS, pb::Empty {}).await?;

        debug!(count = response.products.len(), "Got products");
        products_from_wire(response)
    }
}

/// Map a wire response onto domain products, keeping backend order.
pub fn products_from_wire(response: pb::ListProductsResponse) -> CatalogResult<Vec<Product>> {
    response
        .products
        .into_iter()
        .enumerate()
        .map(|(position, product)| {
            Product::try_from(product)
                .map_err(|source| CatalogError::InvalidProduct { position, source })
        })
        .collect()
}

/// Mock catalog backend for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockCatalogService {
    products: parking_lot::RwLock<Vec<Product>>,
    failure: parking_lot::RwLock<Option<String>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockCatalogService {
    /// Create a mock serving `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: parking_lot::RwLock::new(products),
            failure: parking_lot::RwLock::new(None),
        }
    }

    /// Make every subsequent listing fail as unavailable with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.write() = Some(reason.into());
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl CatalogService for MockCatalogService {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        if let Some(reason) = self.failure.read().as_ref() {
            return Err(storefront_common::BackendError::Unavailable {
                backend: storefront_common::Backend::Catalog,
                source: Box::new(tonic::Status::unavailable(reason.clone())),
            }
            .into());
        }
        Ok(self.products.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_common::{error_chain, Money};

    fn wire_product(id: &str, price_usd: Option<pb::Money>) -> pb::Product {
        pb::Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price_usd,
            ..Default::default()
        }
    }

    fn usd(units: i64) -> Option<pb::Money> {
        Some(pb::Money {
            currency_code: "USD".to_string(),
            units,
            nanos: 0,
        })
    }

    #[test]
    fn test_products_from_wire_keeps_order() {
        let response = pb::ListProductsResponse {
            products: vec![
                wire_product("9SIQT8TOJO", usd(1)),
                wire_product("1YMWWN1N4O", usd(2)),
                wire_product("2ZYFJ3GM2N", usd(3)),
            ],
        };

        let products = products_from_wire(response).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["9SIQT8TOJO", "1YMWWN1N4O", "2ZYFJ3GM2N"]);
    }

    #[test]
    fn test_products_from_wire_reports_bad_position() {
        let response = pb::ListProductsResponse {
            products: vec![wire_product("A", usd(1)), wire_product("B", None)],
        };

        let result = products_from_wire(response);

        assert!(matches!(result, Err(CatalogError::InvalidProduct { position: 1, .. })));
    }

    #[test]
    fn test_empty_catalog() {
        let products = products_from_wire(pb::ListProductsResponse::default()).unwrap();

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_mock_catalog() {
        let service = MockCatalogService::new(vec![Product::new(
            "OLJCESPC7Z",
            "Sunglasses",
            Money::new("USD", 19, 990_000_000),
        )]);

        let products = service.list_products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Sunglasses");
    }

    #[tokio::test]
    async fn test_mock_catalog_failure() {
        let service = MockCatalogService::new(Vec::new());
        service.fail_with("connection refused");

        let err = service.list_products().await.unwrap_err();

        assert!(error_chain(&err).contains("connection refused"));
    }
}
