//! Storefront Currency
//!
//! Currency support for the storefront gateway: the currency backend
//! abstraction, the static display allowlist and the price converter.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_common::Money;
//! use storefront_currency::{ConverterConfig, CurrencyConverter, RemoteCurrencyService};
//!
//! let converter = CurrencyConverter::new(Arc::new(remote), ConverterConfig::default());
//! let eur = converter.convert(&Money::new("USD", 19, 990_000_000), "EUR").await?;
//! ```

pub mod allowlist;
pub mod converter;
pub mod error;
pub mod service;

pub use allowlist::{supported_currencies, CurrencyAllowlist, DEFAULT_ALLOWED_CURRENCIES};
pub use converter::{ConverterConfig, CurrencyConverter};
pub use error::{CurrencyError, CurrencyResult};
pub use service::{CurrencyService, RemoteCurrencyService};

#[cfg(any(test, feature = "test-utils"))]
pub use service::MockCurrencyService;
