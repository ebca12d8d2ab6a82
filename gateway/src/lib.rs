//! Storefront Gateway
//!
//! HTTP front door of the storefront. Assembles the home page from the
//! product catalog and currency backends and renders it as JSON.

pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod session;

pub use config::{BackendConfig, GatewayConfig};
pub use error::PipelineError;
pub use pipeline::{HomePage, HomePipeline, PipelineConfig, ProductView};
pub use render::{currency_logo, render_error, render_json, render_money, ErrorResponse};
pub use server::{router, serve, AppState};
