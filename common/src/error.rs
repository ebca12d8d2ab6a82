//! Shared error types for storefront backends.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Boxed error carried as the source of a backend failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Which backend a call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Product catalog service.
    Catalog,
    /// Currency service.
    Currency,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Catalog => write!(f, "catalog service"),
            Backend::Currency => write!(f, "currency service"),
        }
    }
}

/// Failure talking to a backend service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached or did not answer in time.
    #[error("{backend} unavailable")]
    Unavailable {
        backend: Backend,
        #[source]
        source: BoxError,
    },

    /// The backend answered with an error.
    #[error("{backend} call {method} failed")]
    Rpc {
        backend: Backend,
        method: &'static str,
        #[source]
        source: BoxError,
    },
}

/// Flatten an error and all of its sources into `"outer: inner: root"`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
