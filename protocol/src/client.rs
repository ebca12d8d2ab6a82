//! Unary gRPC client shared by the backend adapters.

use std::time::Duration;

use storefront_common::{Backend, BackendError};
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::debug;

use crate::conversions::ProtocolError;

/// Lazily connected channel to one backend service.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Debug, Clone)]
pub struct UnaryClient {
    backend: Backend,
    channel: Channel,
}

impl UnaryClient {
    /// Build a client for `addr` without connecting yet.
    ///
    /// `timeout` bounds both connection establishment and every call.
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(
        backend: Backend,
        addr: &str,
        timeout: Duration,
    ) -> Result<Self, ProtocolError> {
        let endpoint = Endpoint::from_shared(addr.to_string())
            .map_err(|source| ProtocolError::InvalidEndpoint {
                addr: addr.to_string(),
                source,
            })?
            .connect_timeout(timeout)
            .timeout(timeout);

        Ok(Self {
            backend,
            channel: endpoint.connect_lazy(),
        })
    }

    /// Perform one unary call against `path`.
    pub async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> Result<Resp, BackendError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| self.status_error(path, Status::unavailable(format!("service was not ready: {e}"))))?;

        debug!(backend = %self.backend, path, "Calling backend");

        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                ProstCodec::default(),
            )
            .await
            .map_err(|status| self.status_error(path, status))?;

        Ok(response.into_inner())
    }

    fn status_error(&self, path: &'static str, status: Status) -> BackendError {
        status_to_backend_error(self.backend, path, status)
    }
}

/// Classify a gRPC status as either an availability or a call failure.
pub fn status_to_backend_error(backend: Backend, method: &'static str, status: Status) -> BackendError {
    match status.code() {
        Code::Unavailable | Code::DeadlineExceeded => BackendError::Unavailable {
            backend,
            source: Box::new(status),
        },
        _ => BackendError::Rpc {
            backend,
            method,
            source: Box::new(status),
        },
    }
}
