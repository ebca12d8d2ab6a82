//! Currency converter.

use std::sync::Arc;

use storefront_common::Money;
use tracing::{debug, instrument};

use crate::error::{CurrencyError, CurrencyResult};
use crate::service::CurrencyService;

/// Configuration for the currency converter.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Return the input unchanged when it is already in the target
    /// currency, without calling the backend.
    pub skip_noop_conversions: bool,
}

/// Converts amounts through the currency backend.
///
/// The converter does no currency arithmetic of its own: rates and rounding
/// are the backend's business.
#[derive(Clone)]
pub struct CurrencyConverter {
    service: Arc<dyn CurrencyService>,
    config: ConverterConfig,
}

impl CurrencyConverter {
    /// Create a new converter backed by `service`.
    pub fn new(service: Arc<dyn CurrencyService>, config: ConverterConfig) -> Self {
        Self { service, config }
    }

    /// Convert `from` into the `to_code` currency.
    #[instrument(skip(self, from), fields(from = %from))]
    pub async fn convert(&self, from: &Money, to_code: &str) -> CurrencyResult<Money> {
        if to_code.is_empty() {
            return Err(CurrencyError::InvalidTarget);
        }

        if self.config.skip_noop_conversions && from.is_in(to_code) {
            debug!("Skipping no-op conversion");
            return Ok(from.clone());
        }

        let converted = self.service.convert(from, to_code).await?;
        debug!(to = %converted, "Converted amount");
        Ok(converted)
    }
}
