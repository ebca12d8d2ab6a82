//! Storefront Protocol Messages
//!
//! Protocol buffer message types for the catalog and currency backend
//! services, plus the unary gRPC client both backend adapters share. The
//! messages are declared by hand with `prost` derives so the gateway builds
//! without `protoc`; field tags follow the backends' `.proto` definitions.

pub mod messages;
pub mod conversions;
pub mod client;

pub use messages::*;
pub use conversions::ProtocolError;
pub use client::UnaryClient;
