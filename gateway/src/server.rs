//! HTTP server: shared state, routes and handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Form, State};
use axum::http::header::{LOCATION, REFERER};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Extension, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use storefront_catalog::{CatalogService, RemoteCatalogService};
use storefront_common::{Backend, SessionId};
use storefront_currency::{
    ConverterConfig, CurrencyAllowlist, CurrencyService, RemoteCurrencyService,
};
use storefront_protocol::{ProtocolError, UnaryClient};
use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::middleware::session_context;
use crate::pipeline::{HomePipeline, PipelineConfig};
use crate::render::{render_error, render_json};
use crate::session::{currency_cookie, DisplayCurrency};

/// State shared by every request. Read-only after startup.
pub struct AppState {
    /// Home page pipeline.
    pub pipeline: HomePipeline,
    /// Currencies a shopper may pick as display currency.
    pub allowed_currencies: CurrencyAllowlist,
    /// Display currency when the shopper has not picked one.
    pub default_currency: String,
    /// Lifetime of the cookies the gateway sets.
    pub cookie_max_age: Duration,
}

impl AppState {
    /// Build state over explicit backends.
    pub fn new(
        currency_service: Arc<dyn CurrencyService>,
        catalog_service: Arc<dyn CatalogService>,
        config: &GatewayConfig,
    ) -> Self {
        let pipeline = HomePipeline::new(
            currency_service,
            catalog_service,
            PipelineConfig {
                allowlist: config.allowlist(),
                converter: ConverterConfig {
                    skip_noop_conversions: config.skip_noop_conversions,
                },
                banner_color: config.banner_color.clone(),
            },
        );

        Self {
            pipeline,
            allowed_currencies: config.allowlist(),
            default_currency: config.default_currency.clone(),
            cookie_max_age: config.cookie_max_age,
        }
    }

    /// Build state with gRPC clients for the configured backends.
    ///
    /// Connections are made lazily, on first use.
    pub fn connect(config: &GatewayConfig) -> Result<Self, ProtocolError> {
        let backends = &config.backends;
        let currency = UnaryClient::connect_lazy(
            Backend::Currency,
            &backends.currency_addr,
            backends.rpc_timeout,
        )?;
        let catalog = UnaryClient::connect_lazy(
            Backend::Catalog,
            &backends.catalog_addr,
            backends.rpc_timeout,
        )?;

        Ok(Self::new(
            Arc::new(RemoteCurrencyService::new(currency)),
            Arc::new(RemoteCatalogService::new(catalog)),
            config,
        ))
    }
}

/// Build the gateway router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/setCurrency", post(set_currency))
        .route("/_healthz", get(healthz))
        .layer(middleware::from_fn_with_state(state.clone(), session_context))
        .with_state(state)
}

/// Serve `state` on the configured address until Ctrl+C.
pub async fn serve(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.listen_addr, config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        listen_addr = %addr,
        catalog_addr = %config.backends.catalog_addr,
        currency_addr = %config.backends.currency_addr,
        "Gateway listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

async fn home(
    State(state): State<Arc<AppState>>,
    DisplayCurrency(currency): DisplayCurrency,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    info!(currency = %currency, session_id = %session_id, "home");

    match state.pipeline.home(&currency).await {
        Ok(page) => render_json(&page),
        Err(err) => render_error(&err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[derive(Debug, Deserialize)]
struct SetCurrencyForm {
    #[serde(default)]
    currency_code: String,
}

/// Remember the shopper's display currency and send them back.
///
/// Only allowlisted codes are stored; anything else just redirects.
async fn set_currency(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<SetCurrencyForm>,
) -> Response {
    let location = headers
        .get(REFERER)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("/"));
    let redirect = (StatusCode::FOUND, [(LOCATION, location)]);

    let code = form.currency_code;
    if code.is_empty() {
        return redirect.into_response();
    }
    if !state.allowed_currencies.contains(&code) {
        warn!(currency = ?code, "Rejected display currency outside the allowlist");
        return redirect.into_response();
    }

    info!(currency = %code, "Display currency changed");
    let jar = jar.add(currency_cookie(&code, state.cookie_max_age));
    (jar, redirect).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}
