//! Conversions between wire messages and domain types.

use storefront_common as domain;
use thiserror::Error;

use crate::messages::{self as pb};

/// Errors raised while mapping wire messages onto domain types.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A required message field was absent.
    #[error("{message} is missing required field {field}")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },

    /// A money value is outside the representable range.
    #[error("invalid amount {units}.{nanos:09} {currency_code}")]
    InvalidMoney {
        currency_code: String,
        units: i64,
        nanos: i32,
    },

    /// A backend address could not be parsed as a URI.
    #[error("invalid backend address {addr}")]
    InvalidEndpoint {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },
}

impl TryFrom<pb::Money> for domain::Money {
    type Error = ProtocolError;

    fn try_from(money: pb::Money) -> Result<Self, Self::Error> {
        let converted = domain::Money::new(money.currency_code, money.units, money.nanos);
        if !converted.is_valid() {
            return Err(ProtocolError::InvalidMoney {
                currency_code: converted.currency_code,
                units: converted.units,
                nanos: converted.nanos,
            });
        }
        Ok(converted)
    }
}

impl From<&domain::Money> for pb::Money {
    fn from(money: &domain::Money) -> Self {
        Self {
            currency_code: money.currency_code.clone(),
            units: money.units,
            nanos: money.nanos,
        }
    }
}

impl TryFrom<pb::Product> for domain::Product {
    type Error = ProtocolError;

    fn try_from(product: pb::Product) -> Result<Self, Self::Error> {
        let price_usd = product.price_usd.ok_or(ProtocolError::MissingField {
            message: "Product",
            field: "price_usd",
        })?;

        Ok(Self {
            id: domain::ProductId::new(product.id),
            name: product.name,
            description: product.description,
            picture: product.picture,
            price_usd: price_usd.try_into()?,
            categories: product.categories,
        })
    }
}

impl From<&domain::Product> for pb::Product {
    fn from(product: &domain::Product) -> Self {
        Self {
            id: product.id.as_str().to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            picture: product.picture.clone(),
            price_usd: Some((&product.price_usd).into()),
            categories: product.categories.clone(),
        }
    }
}

impl pb::CurrencyConversionRequest {
    /// Build a conversion request for `from` into `to_code`.
    pub fn new(from: &domain::Money, to_code: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to_code: to_code.into(),
        }
    }
}
