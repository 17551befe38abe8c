use core_http::ApiError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AuthError {
    /// The authorization server rejected a credential exchange; the
    /// structured payload is kept for diagnostics.
    #[error("authentication failed: {0}")]
    Authentication(ApiError),

    /// Transport or decoding failures, passed through unchanged.
    #[error(transparent)]
    Http(#[from] core_http::Error),
}

impl AuthError {
    /// Remaps pipeline errors at the credential-exchange boundary: a
    /// structured API rejection becomes [`AuthError::Authentication`],
    /// everything else passes through.
    pub(crate) fn from_exchange(err: core_http::Error) -> Self {
        match err {
            core_http::Error::Api(api) => AuthError::Authentication(api),
            other => AuthError::Http(other),
        }
    }

    /// The structured API error, when this failure carries one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AuthError::Authentication(api) => Some(api),
            AuthError::Http(core_http::Error::Api(api)) => Some(api),
            AuthError::Http(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
