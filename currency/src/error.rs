//! Currency error types.

use storefront_common::BackendError;
use storefront_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur while listing or converting currencies.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// The currency backend failed or could not be reached.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The backend does not know the requested currency.
    #[error("unsupported currency {code}")]
    UnsupportedCurrency {
        code: String,
        #[source]
        source: BackendError,
    },

    /// The target currency code is empty.
    #[error("target currency code must not be empty")]
    InvalidTarget,

    /// The backend answered with a payload that does not map onto a Money.
    #[error("currency service returned an invalid amount")]
    InvalidResponse(#[source] ProtocolError),
}

/// Result type for currency operations.
pub type CurrencyResult<T> = Result<T, CurrencyError>;
