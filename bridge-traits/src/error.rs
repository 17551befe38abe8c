use thiserror::Error;

/// Transport-level failures, reported before any status-code classification.
///
/// Payloads are plain strings so completed results stay `Clone` and can fan
/// out to every waiter of an `AsyncResult`.
#[derive(Error, Debug, Clone)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
