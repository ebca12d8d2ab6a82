//! Home page aggregation.
//!
//! Fetches the allowed currencies and the catalog, then converts every
//! product price into the display currency. Any failure aborts the whole
//! page: a response never mixes converted and unconverted prices.

use std::sync::Arc;

use serde::Serialize;
use storefront_catalog::{CatalogFetcher, CatalogService};
use storefront_common::{Money, Product};
use storefront_currency::{
    supported_currencies, ConverterConfig, CurrencyAllowlist, CurrencyConverter, CurrencyService,
};
use tracing::{debug, instrument, warn};

use crate::error::PipelineError;
use crate::render::render_money;

/// A product paired with its price in the display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    /// The catalog product.
    pub item: Product,
    /// Price converted into the display currency.
    pub price: Money,
    /// `price` formatted for display, e.g. `€18.39`.
    pub display_price: String,
}

impl ProductView {
    /// Pair `item` with its converted `price`.
    pub fn new(item: Product, price: Money) -> Self {
        let display_price = render_money(&price);
        Self {
            item,
            price,
            display_price,
        }
    }
}

/// Payload of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub show_currency: bool,
    /// Allowed currencies, in the currency backend's order.
    pub currencies: Vec<String>,
    /// Products in catalog order.
    pub products: Vec<ProductView>,
    pub banner_color: String,
}

/// Configuration for the home pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Currencies the storefront may display.
    pub allowlist: CurrencyAllowlist,
    /// Converter settings.
    pub converter: ConverterConfig,
    /// Deployment banner colour, passed through verbatim.
    pub banner_color: String,
}

/// Builds the home page for one request.
pub struct HomePipeline {
    currency_service: Arc<dyn CurrencyService>,
    allowlist: CurrencyAllowlist,
    catalog: CatalogFetcher,
    converter: CurrencyConverter,
    banner_color: String,
}

impl HomePipeline {
    /// Create a pipeline over the given backends.
    pub fn new(
        currency_service: Arc<dyn CurrencyService>,
        catalog_service: Arc<dyn CatalogService>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            converter: CurrencyConverter::new(currency_service.clone(), config.converter),
            currency_service,
            allowlist: config.allowlist,
            catalog: CatalogFetcher::new(catalog_service),
            banner_color: config.banner_color,
        }
    }

    /// Build the home page with prices in `display_currency`.
    #[instrument(skip(self))]
    pub async fn home(&self, display_currency: &str) -> Result<HomePage, PipelineError> {
        let currencies = supported_currencies(self.currency_service.as_ref(), &self.allowlist)
            .await
            .map_err(PipelineError::Currencies)?;

        let products = self
            .catalog
            .list_products()
            .await
            .map_err(PipelineError::Products)?;

        let mut views = Vec::with_capacity(products.len());
        for product in products {
            let price = match self.converter.convert(&product.price_usd, display_currency).await {
                Ok(price) => price,
                Err(source) => {
                    warn!(product_id = %product.id, "Price conversion failed");
                    return Err(PipelineError::Conversion {
                        product_id: product.id,
                        source,
                    });
                }
            };
            views.push(ProductView::new(product, price));
        }

        debug!(
            currencies = currencies.len(),
            products = views.len(),
            "Home page assembled"
        );

        Ok(HomePage {
            show_currency: true,
            currencies,
            products: views,
            banner_color: self.banner_color.clone(),
        })
    }
}
