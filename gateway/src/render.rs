//! Response rendering.

use std::error::Error as StdError;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_common::{error_chain, Money};
use tracing::error;

use crate::error::PipelineError;

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Reason phrase of the HTTP status.
    pub error: String,
    /// Full error chain.
    pub message: String,
}

/// Serialize `payload` as a 200 JSON response.
///
/// The body is serialized before anything is written, so a serialization
/// failure still produces a clean error response.
pub fn render_json<T: Serialize>(payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response(),
        Err(err) => render_error(&PipelineError::Render(err), StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Log `err` and turn it into a JSON error response with `status`.
pub fn render_error(err: &(dyn StdError + 'static), status: StatusCode) -> Response {
    let message = error_chain(err);
    error!(error = %message, status = status.as_u16(), "request error");

    let body = ErrorResponse {
        error: status.canonical_reason().unwrap_or("Unknown Error").to_string(),
        message,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        render_error(&self, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Display symbol for a currency code. Unknown codes get `$`.
pub fn currency_logo(currency_code: &str) -> &'static str {
    match currency_code {
        "USD" | "CAD" => "$",
        "JPY" => "¥",
        "EUR" => "€",
        "TRY" => "₺",
        "GBP" => "£",
        _ => "$",
    }
}

/// Format money for display, truncating to two decimals.
pub fn render_money(money: &Money) -> String {
    format!(
        "{}{}.{:02}",
        currency_logo(&money.currency_code),
        money.units,
        money.nanos / 10_000_000
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use parking_lot::Mutex;
    use serde::ser::{Error as _, Serializer};
    use serde_json::Value;
    use std::io::{self, Write};
    use std::sync::Arc;
    use storefront_catalog::CatalogError;
    use storefront_common::{Backend, BackendError};

    /// JSON log lines written while a closure runs.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn events_at(&self, level: &str) -> Vec<Value> {
            let bytes = self.0.lock().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str::<Value>(line).unwrap())
                .filter(|event| event["level"] == level)
                .collect()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs)
    }

    #[test]
    fn test_render_money() {
        assert_eq!(render_money(&Money::new("USD", 19, 990_000_000)), "$19.99");
        assert_eq!(render_money(&Money::new("JPY", 500, 0)), "¥500.00");
        assert_eq!(render_money(&Money::new("EUR", 7, 5_000_000)), "€7.00");
        assert_eq!(render_money(&Money::new("GBP", 0, 999_999_999)), "£0.99");
    }

    #[test]
    fn test_unknown_currency_uses_dollar() {
        assert_eq!(currency_logo("XXX"), "$");
        assert_eq!(render_money(&Money::new("XXX", 3, 0)), "$3.00");
    }

    #[test]
    fn test_currency_logos() {
        assert_eq!(currency_logo("CAD"), "$");
        assert_eq!(currency_logo("TRY"), "₺");
        assert_eq!(currency_logo("EUR"), "€");
    }

    #[tokio::test]
    async fn test_render_json_success() {
        let response = render_json(&serde_json::json!({ "show_currency": true }));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("application/json")
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"show_currency":true}"#);
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    #[tokio::test]
    async fn test_render_json_serialization_failure() {
        let response = render_json(&Unserializable);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "could not render data: refusing to serialize");
    }

    #[tokio::test]
    async fn test_render_error_uses_status_and_chain() {
        let err = io::Error::new(io::ErrorKind::Other, "backend exploded");

        let response = render_error(&err, StatusCode::BAD_GATEWAY);

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "Bad Gateway");
        assert_eq!(body.message, "backend exploded");
    }

    #[test]
    fn test_render_error_logs_chain_once() {
        let err = PipelineError::Products(CatalogError::Backend(BackendError::Unavailable {
            backend: Backend::Catalog,
            source: Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused")),
        }));

        let (response, logs) =
            with_captured_logs(|| render_error(&err, StatusCode::INTERNAL_SERVER_ERROR));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let errors = logs.events_at("ERROR");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0]["fields"]["error"],
            "could not retrieve products: catalog service unavailable: connection refused"
        );
        assert_eq!(errors[0]["fields"]["status"], 500);
    }

    #[test]
    fn test_render_json_failure_logs_chain_once() {
        let (response, logs) = with_captured_logs(|| render_json(&Unserializable));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let errors = logs.events_at("ERROR");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0]["fields"]["error"],
            "could not render data: refusing to serialize"
        );
    }

    #[test]
    fn test_render_json_success_logs_no_error() {
        let (response, logs) = with_captured_logs(|| render_json(&serde_json::json!([1, 2])));

        assert_eq!(response.status(), StatusCode::OK);
        assert!(logs.events_at("ERROR").is_empty());
    }
}
