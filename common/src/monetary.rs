//! Monetary types for the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of nanos in one whole currency unit.
pub const NANOS_PER_UNIT: i32 = 1_000_000_000;

/// An amount of money in a given currency.
///
/// Whole units and a nano-unit fraction are kept separately, mirroring the
/// representation used by the backend services. Only non-negative amounts
/// are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Whole units of the amount.
    pub units: i64,
    /// Nano (10^-9) units of the amount, `0 <= nanos < 10^9`.
    pub nanos: i32,
}

impl Money {
    /// Create a new Money instance.
    pub fn new(currency_code: impl Into<String>, units: i64, nanos: i32) -> Self {
        Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        }
    }

    /// Check that units and nanos form a valid non-negative amount.
    pub fn is_valid(&self) -> bool {
        self.units >= 0 && (0..NANOS_PER_UNIT).contains(&self.nanos)
    }

    /// Check whether this amount is already expressed in `currency_code`.
    pub fn is_in(&self, currency_code: &str) -> bool {
        self.currency_code == currency_code
    }

    /// Exact decimal view of the amount.
    pub fn amount(&self) -> Decimal {
        (Decimal::from(self.units) + Decimal::new(i64::from(self.nanos), 9)).normalize()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.currency_code)
    }
}
