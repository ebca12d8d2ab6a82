//! Gateway configuration.

use std::time::Duration;

use storefront_currency::{CurrencyAllowlist, DEFAULT_ALLOWED_CURRENCIES};

/// Backend service configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Address of the product catalog service.
    pub catalog_addr: String,
    /// Address of the currency service.
    pub currency_addr: String,
    /// Deadline for connecting to a backend and for every call.
    pub rpc_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            catalog_addr: "http://localhost:3550".to_string(),
            currency_addr: "http://localhost:7000".to_string(),
            rpc_timeout: Duration::from_millis(3000),
        }
    }
}

/// Main gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Backend configuration.
    pub backends: BackendConfig,
    /// Currency codes the storefront may display.
    pub allowed_currencies: Vec<String>,
    /// Display currency when the shopper has not picked one.
    pub default_currency: String,
    /// Skip backend calls for same-currency conversions.
    pub skip_noop_conversions: bool,
    /// Deployment banner colour, passed through to responses.
    pub banner_color: String,
    /// Session cookie lifetime.
    pub cookie_max_age: Duration,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8080,
            backends: BackendConfig::default(),
            allowed_currencies: DEFAULT_ALLOWED_CURRENCIES.iter().map(|c| c.to_string()).collect(),
            default_currency: "USD".to_string(),
            skip_noop_conversions: false,
            banner_color: String::new(),
            cookie_max_age: Duration::from_secs(48 * 60 * 60),
            log_level: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through `var`, falling back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = var("GATEWAY_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Some(port) = var("PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Some(addr) = var("PRODUCT_CATALOG_SERVICE_ADDR") {
            config.backends.catalog_addr = addr;
        }

        if let Some(addr) = var("CURRENCY_SERVICE_ADDR") {
            config.backends.currency_addr = addr;
        }

        if let Some(timeout) = var("RPC_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                config.backends.rpc_timeout = Duration::from_millis(ms);
            }
        }

        if let Some(codes) = var("SUPPORTED_CURRENCIES") {
            config.allowed_currencies = codes
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(code) = var("DEFAULT_CURRENCY") {
            config.default_currency = code;
        }

        if let Some(flag) = var("SKIP_NOOP_CURRENCY_CONVERSION") {
            config.skip_noop_conversions = matches!(flag.as_str(), "1" | "true" | "TRUE" | "yes");
        }

        if let Some(color) = var("BANNER_COLOR") {
            config.banner_color = color;
        }

        if let Some(level) = var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// The configured display allowlist.
    pub fn allowlist(&self) -> CurrencyAllowlist {
        CurrencyAllowlist::new(self.allowed_currencies.iter().cloned())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if self.backends.catalog_addr.is_empty() {
            return Err("Catalog service address cannot be empty".to_string());
        }

        if self.backends.currency_addr.is_empty() {
            return Err("Currency service address cannot be empty".to_string());
        }

        if self.backends.rpc_timeout.is_zero() {
            return Err("RPC timeout cannot be zero".to_string());
        }

        if self.default_currency.is_empty() {
            return Err("Default currency cannot be empty".to_string());
        }

        if self.allowlist().is_empty() {
            return Err("Supported currencies cannot be empty".to_string());
        }

        Ok(())
    }
}
