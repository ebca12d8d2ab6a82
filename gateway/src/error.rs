//! Gateway error types.

use storefront_catalog::CatalogError;
use storefront_common::ProductId;
use storefront_currency::CurrencyError;
use thiserror::Error;

/// Errors that abort a storefront request.
///
/// Every variant keeps its cause as `source`, so the full chain can be
/// logged and reported.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Listing the supported currencies failed.
    #[error("could not retrieve currencies")]
    Currencies(#[source] CurrencyError),

    /// Listing the catalog failed.
    #[error("could not retrieve products")]
    Products(#[source] CatalogError),

    /// Converting one product's price failed.
    #[error("failed to do currency conversion for product {product_id}")]
    Conversion {
        product_id: ProductId,
        #[source]
        source: CurrencyError,
    },

    /// The assembled payload could not be serialized.
    #[error("could not render data")]
    Render(#[source] serde_json::Error),
}
