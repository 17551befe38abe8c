use bridge_traits::BridgeError;
use bytes::Bytes;
use thiserror::Error;

use crate::api::ApiError;

/// Pipeline failures, one variant per way a request can go wrong.
///
/// Callers match on the kind; every variant carries enough context to log or
/// diagnose without re-running the request. All payloads are owned and
/// `Clone` so a completed result can be observed by multiple waiters.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Transport-level failure (connection, DNS, TLS, timeout), surfaced
    /// before any status-code classification.
    #[error("network failure: {0}")]
    Network(String),

    /// The service answered with a non-2xx status; the structured payload is
    /// preserved in the [`ApiError`].
    #[error("API request rejected: {0}")]
    Api(ApiError),

    /// A 2xx response carried a body where none was expected.
    #[error("expected empty response, got {} bytes (status {status})", body.len())]
    UnexpectedBody { status: u16, body: Bytes },

    /// A 2xx response body failed to decode into the expected shape; the raw
    /// bytes and the decode cause are retained.
    #[error("invalid response body (status {status}): {reason}")]
    Decode {
        status: u16,
        body: Bytes,
        reason: String,
    },

    /// A request payload could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(String),
}

impl From<BridgeError> for Error {
    fn from(err: BridgeError) -> Self {
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
