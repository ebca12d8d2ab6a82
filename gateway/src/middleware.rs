//! Request middleware: session cookie, request id and access logging.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use storefront_common::RequestId;
use tracing::{debug, info, info_span, Instrument};

use crate::server::AppState;
use crate::session::{session_cookie, session_id};

/// Attach a [`RequestId`] and [`SessionId`] to every request and log its
/// outcome.
///
/// Requests without a valid session cookie get a fresh session id, which is
/// set as a cookie on the response.
pub async fn session_context(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = RequestId::new();
    let jar = CookieJar::from_headers(request.headers());
    let existing = session_id(&jar);
    let minted = existing.is_none();
    let session_id = existing.unwrap_or_default();

    request.extensions_mut().insert(request_id);
    request.extensions_mut().insert(session_id);

    let span = info_span!(
        "request",
        request_id = %request_id,
        session_id = %session_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let started = Instant::now();
        debug!("Request started");

        let mut response = next.run(request).await;

        if minted {
            let jar = jar.add(session_cookie(session_id, state.cookie_max_age));
            response = (jar, response).into_response();
        }

        info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request complete"
        );
        response
    }
    .instrument(span)
    .await
}
