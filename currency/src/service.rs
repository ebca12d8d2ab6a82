//! Currency backend trait and implementations.

use async_trait::async_trait;
use storefront_common::{Backend, BackendError, Money};
use storefront_protocol::messages::{self as pb, paths};
use storefront_protocol::UnaryClient;
use tonic::Code;
use tracing::{debug, instrument};

#[cfg(any(test, feature = "test-utils"))]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{CurrencyError, CurrencyResult};

/// Capabilities the gateway needs from the currency backend.
#[async_trait]
pub trait CurrencyService: Send + Sync {
    /// List every currency code the backend can convert into.
    async fn supported_currencies(&self) -> CurrencyResult<Vec<String>>;

    /// Convert `from` into `to_code`.
    async fn convert(&self, from: &Money, to_code: &str) -> CurrencyResult<Money>;
}

/// Currency backend reached over gRPC.
#[derive(Debug, Clone)]
pub struct RemoteCurrencyService {
    client: UnaryClient,
}

impl RemoteCurrencyService {
    /// Wrap an existing client.
    pub fn new(client: UnaryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CurrencyService for RemoteCurrencyService {
    #[instrument(skip(self))]
    async fn supported_currencies(&self) -> CurrencyResult<Vec<String>> {
        let response: pb::GetSupportedCurrenciesResponse = self
            .client
            .unary(paths::GET_SUPPORTED_CURRENCIES, pb::Empty {})
            .await?;

        debug!(count = response.currency_codes.len(), "Got supported currencies");
        Ok(response.currency_codes)
    }

    #[instrument(skip(self, from), fields(from = %from))]
    async fn convert(&self, from: &Money, to_code: &str) -> CurrencyResult<Money> {
        let request = pb::CurrencyConversionRequest::new(from, to_code);
        let response: pb::Money = self
            .client
            .unary(paths::CONVERT, request)
            .await
            .map_err(|err| classify_conversion_error(to_code, err))?;

        Money::try_from(response).map_err(CurrencyError::InvalidResponse)
    }
}

/// Unknown currencies come back as `InvalidArgument`/`NotFound`; surface
/// those separately from plain backend failures.
fn classify_conversion_error(to_code: &str, err: BackendError) -> CurrencyError {
    let unsupported = match &err {
        BackendError::Rpc { source, .. } => source
            .downcast_ref::<tonic::Status>()
            .map(|status| matches!(status.code(), Code::InvalidArgument | Code::NotFound))
            .unwrap_or(false),
        _ => false,
    };

    if unsupported {
        CurrencyError::UnsupportedCurrency {
            code: to_code.to_string(),
            source: err,
        }
    } else {
        CurrencyError::Backend(err)
    }
}

/// Mock currency backend for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockCurrencyService {
    supported: parking_lot::RwLock<Vec<String>>,
    /// Canned conversion results keyed by target code.
    rates: dashmap::DashMap<String, Money>,
    /// Targets whose conversion fails.
    failing_targets: dashmap::DashSet<String>,
    fail_listing: AtomicBool,
    /// Conversions from this call index onwards fail.
    fail_after: AtomicUsize,
    convert_calls: AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockCurrencyService {
    /// Create a mock supporting the given codes.
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: parking_lot::RwLock::new(supported.into_iter().map(Into::into).collect()),
            rates: dashmap::DashMap::new(),
            failing_targets: dashmap::DashSet::new(),
            fail_listing: AtomicBool::new(false),
            fail_after: AtomicUsize::new(usize::MAX),
            convert_calls: AtomicUsize::new(0),
        }
    }

    /// Every conversion into `result.currency_code` returns `result`.
    pub fn set_conversion(&self, result: Money) {
        self.rates.insert(result.currency_code.clone(), result);
    }

    /// Make conversions into `code` fail as unsupported.
    pub fn fail_conversions_to(&self, code: impl Into<String>) {
        self.failing_targets.insert(code.into());
    }

    /// Let the first `n` conversions through, then fail every later one
    /// as unavailable.
    pub fn fail_conversions_after(&self, n: usize) {
        self.fail_after.store(n, Ordering::SeqCst);
    }

    /// Make `supported_currencies` fail as unavailable.
    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    /// Number of `convert` calls that reached the backend.
    pub fn convert_calls(&self) -> usize {
        self.convert_calls.load(Ordering::SeqCst)
    }

    fn unavailable(reason: &str) -> BackendError {
        BackendError::Unavailable {
            backend: Backend::Currency,
            source: Box::new(tonic::Status::unavailable(reason.to_string())),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl CurrencyService for MockCurrencyService {
    async fn supported_currencies(&self) -> CurrencyResult<Vec<String>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(Self::unavailable("connection refused").into());
        }
        Ok(self.supported.read().clone())
    }

    async fn convert(&self, from: &Money, to_code: &str) -> CurrencyResult<Money> {
        let call = self.convert_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_after.load(Ordering::SeqCst) {
            return Err(Self::unavailable("connection reset").into());
        }

        if self.failing_targets.contains(to_code) {
            let status = tonic::Status::invalid_argument(format!("unsupported currency {to_code}"));
            return Err(classify_conversion_error(
                to_code,
                BackendError::Rpc {
                    backend: Backend::Currency,
                    method: paths::CONVERT,
                    source: Box::new(status),
                },
            ));
        }

        if let Some(result) = self.rates.get(to_code) {
            return Ok(result.clone());
        }

        // Without a canned rate, same-currency conversions echo the input.
        if from.is_in(to_code) {
            return Ok(from.clone());
        }

        Err(Self::unavailable("no canned conversion").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_supported_currencies() {
        let service = MockCurrencyService::new(["USD", "EUR", "CHF"]);

        let codes = service.supported_currencies().await.unwrap();

        assert_eq!(codes, vec!["USD", "EUR", "CHF"]);
    }

    #[tokio::test]
    async fn test_mock_listing_failure() {
        let service = MockCurrencyService::new(["USD"]);
        service.fail_listing();

        let result = service.supported_currencies().await;

        assert!(matches!(
            result,
            Err(CurrencyError::Backend(BackendError::Unavailable { .. }))
        ));
    }

    #[tokio::test]
    async fn test_mock_conversion_counts_calls() {
        let service = MockCurrencyService::new(["USD", "EUR"]);
        service.set_conversion(Money::new("EUR", 17, 500_000_000));

        let converted = service
            .convert(&Money::new("USD", 19, 990_000_000), "EUR")
            .await
            .unwrap();

        assert_eq!(converted, Money::new("EUR", 17, 500_000_000));
        assert_eq!(service.convert_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_fails_after_n_conversions() {
        let service = MockCurrencyService::new(["USD", "EUR"]);
        service.set_conversion(Money::new("EUR", 1, 0));
        service.fail_conversions_after(1);
        let usd = Money::new("USD", 1, 0);

        assert!(service.convert(&usd, "EUR").await.is_ok());
        assert!(service.convert(&usd, "EUR").await.is_err());
        assert_eq!(service.convert_calls(), 2);
    }

    #[test]
    fn test_invalid_argument_is_unsupported_currency() {
        let err = classify_conversion_error(
            "XXX",
            BackendError::Rpc {
                backend: Backend::Currency,
                method: paths::CONVERT,
                source: Box::new(tonic::Status::invalid_argument("unknown code")),
            },
        );

        assert!(matches!(err, CurrencyError::UnsupportedCurrency { ref code, .. } if code == "XXX"));
    }

    #[test]
    fn test_unavailable_stays_backend_error() {
        let err = classify_conversion_error(
            "EUR",
            BackendError::Unavailable {
                backend: Backend::Currency,
                source: Box::new(tonic::Status::unavailable("down")),
            },
        );

        assert!(matches!(err, CurrencyError::Backend(_)));
    }
}
