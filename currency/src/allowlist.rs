//! Static currency allowlist.

use tracing::{debug, instrument};

use crate::error::CurrencyResult;
use crate::service::CurrencyService;

/// Currencies shown when no allowlist is configured.
pub const DEFAULT_ALLOWED_CURRENCIES: [&str; 6] = ["USD", "EUR", "CAD", "JPY", "GBP", "TRY"];

/// The set of currency codes the storefront is willing to display.
///
/// Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAllowlist {
    codes: Vec<String>,
}

impl CurrencyAllowlist {
    /// Create an allowlist from the given codes. Duplicates are dropped.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for code in codes.into_iter().map(Into::into) {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self { codes: unique }
    }

    /// Check whether `code` may be displayed.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|allowed| allowed == code)
    }

    /// Allowed codes in configuration order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// True when no currency is allowed.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Keep the codes of `supported` that are allowed, in their original
    /// order. Duplicates in `supported` are kept as they are.
    pub fn filter<I, S>(&self, supported: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        supported
            .into_iter()
            .map(Into::into)
            .filter(|code| self.contains(code))
            .collect()
    }
}

impl Default for CurrencyAllowlist {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_CURRENCIES)
    }
}

/// Fetch the backend's supported currencies and keep the allowed ones.
#[instrument(skip_all)]
pub async fn supported_currencies(
    service: &dyn CurrencyService,
    allowlist: &CurrencyAllowlist,
) -> CurrencyResult<Vec<String>> {
    let supported = service.supported_currencies().await?;
    let total = supported.len();
    let allowed = allowlist.filter(supported);

    debug!(supported = total, allowed = allowed.len(), "Filtered supported currencies");
    Ok(allowed)
}
