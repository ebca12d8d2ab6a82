//! Storefront Common Types
//!
//! This crate contains shared types used across the storefront gateway,
//! including identifiers, monetary types, catalog products and backend errors.

pub mod identifiers;
pub mod monetary;
pub mod product;
pub mod error;

pub use identifiers::*;
pub use monetary::*;
pub use product::*;
pub use error::*;
