//! Protocol message types.
//!
//! These types are exchanged between the gateway and the backend services
//! over gRPC.

/// Fully qualified gRPC method paths.
pub mod paths {
    /// Catalog: list every product.
    pub const LIST_PRODUCTS: &str = "/hipstershop.ProductCatalogService/ListProducts";
    /// Currency: list supported currency codes.
    pub const GET_SUPPORTED_CURRENCIES: &str = "/hipstershop.CurrencyService/GetSupportedCurrencies";
    /// Currency: convert an amount into another currency.
    pub const CONVERT: &str = "/hipstershop.CurrencyService/Convert";
}

/// Empty request body.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}

/// Monetary amount.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Money {
    /// ISO 4217 currency code.
    #[prost(string, tag = "1")]
    pub currency_code: ::prost::alloc::string::String,
    /// Whole units.
    #[prost(int64, tag = "2")]
    pub units: i64,
    /// Nano units, `0 <= nanos < 10^9` for non-negative amounts.
    #[prost(int32, tag = "3")]
    pub nanos: i32,
}

/// Catalog product.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Product {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub picture: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "5")]
    pub price_usd: ::core::option::Option<Money>,
    #[prost(string, repeated, tag = "6")]
    pub categories: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// Response to `ListProducts`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListProductsResponse {
    #[prost(message, repeated, tag = "1")]
    pub products: ::prost::alloc::vec::Vec<Product>,
}

/// Response to `GetSupportedCurrencies`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSupportedCurrenciesResponse {
    #[prost(string, repeated, tag = "1")]
    pub currency_codes: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// Request to `Convert`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrencyConversionRequest {
    /// Amount to convert.
    #[prost(message, optional, tag = "1")]
    pub from: ::core::option::Option<Money>,
    /// Target currency code.
    #[prost(string, tag = "2")]
    pub to_code: ::prost::alloc::string::String,
}
