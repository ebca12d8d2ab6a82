//! Session state carried in cookies.
//!
//! This is the only place that knows how the display currency and session
//! id travel with a request; the pipeline only ever sees a currency code.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use cookie::time;
use storefront_common::SessionId;

use crate::server::AppState;

/// Cookie holding the shopper's display currency.
pub const COOKIE_CURRENCY: &str = "shop_currency";
/// Cookie holding the shopper's session id.
pub const COOKIE_SESSION_ID: &str = "shop_session-id";

/// Display currency for the request, or `default` when none was chosen.
pub fn current_currency(jar: &CookieJar, default: &str) -> String {
    match jar.get(COOKIE_CURRENCY).map(|cookie| cookie.value()) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => default.to_string(),
    }
}

/// Session id carried by the request, if it holds a well-formed one.
pub fn session_id(jar: &CookieJar) -> Option<SessionId> {
    jar.get(COOKIE_SESSION_ID)
        .and_then(|cookie| SessionId::parse(cookie.value()).ok())
}

/// Cookie remembering the shopper's display currency.
pub fn currency_cookie(code: &str, max_age: Duration) -> Cookie<'static> {
    shop_cookie(COOKIE_CURRENCY, code.to_string(), max_age)
}

/// Cookie carrying a freshly minted session id.
pub fn session_cookie(id: SessionId, max_age: Duration) -> Cookie<'static> {
    shop_cookie(COOKIE_SESSION_ID, id.to_string(), max_age)
}

fn shop_cookie(name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
    let seconds = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((name, value))
        .path("/")
        .max_age(time::Duration::seconds(seconds))
        .build()
}

/// Extractor for the request's display currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCurrency(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for DisplayCurrency {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(current_currency(&jar, &state.default_currency)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::{HeaderMap, HeaderValue};

    fn jar(cookies: &[&str]) -> CookieJar {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_current_currency_defaults() {
        assert_eq!(current_currency(&jar(&[]), "USD"), "USD");
        assert_eq!(current_currency(&jar(&["shop_currency="]), "USD"), "USD");
        assert_eq!(current_currency(&jar(&["shop_currency=GBP"]), "USD"), "GBP");
    }

    #[test]
    fn test_current_currency_across_headers() {
        let jar = jar(&["theme=dark", "shop_session-id=abc; shop_currency=JPY"]);

        assert_eq!(current_currency(&jar, "USD"), "JPY");
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        assert_eq!(current_currency(&jar(&["xshop_currency=EUR"]), "USD"), "USD");
    }

    #[test]
    fn test_session_id() {
        let id = SessionId::new();

        assert_eq!(session_id(&jar(&[&format!("shop_session-id={id}")])), Some(id));
        assert_eq!(session_id(&jar(&["shop_session-id=not-a-uuid"])), None);
        assert_eq!(session_id(&jar(&[])), None);
    }

    #[test]
    fn test_currency_cookie() {
        let cookie = currency_cookie("EUR", Duration::from_secs(172_800));

        assert_eq!(cookie.name(), COOKIE_CURRENCY);
        assert_eq!(cookie.value(), "EUR");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(172_800)));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn test_cookie_value_cannot_add_attributes() {
        let cookie = currency_cookie("EUR; Domain=evil.example", Duration::from_secs(60));

        let encoded = cookie.encoded().to_string();
        assert!(!encoded.contains("Domain=evil.example"));

        let parsed = Cookie::parse_encoded(encoded).unwrap();
        assert_eq!(parsed.value(), "EUR; Domain=evil.example");
        assert_eq!(parsed.domain(), None);
        assert_eq!(parsed.max_age(), Some(time::Duration::seconds(60)));
    }
}
