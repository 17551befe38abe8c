use core_http::ApiError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DriveError {
    /// The service rejected access to an entry (missing, no permission,
    /// locked); the structured payload is preserved.
    #[error("cannot access entry `{path}`: {source}")]
    ItemAccess { path: String, source: ApiError },

    /// The entry exists but is not a file (e.g. download of a folder).
    #[error("`{0}` is not a file")]
    NotAFile(String),

    /// The entry exists but is not a folder (e.g. listing a file's children).
    #[error("`{0}` is not a folder")]
    NotAFolder(String),

    /// Credential resolution failed.
    #[error(transparent)]
    Auth(#[from] core_auth::AuthError),

    /// Transport or decoding failures, passed through unchanged.
    #[error(transparent)]
    Http(#[from] core_http::Error),
}

impl DriveError {
    /// Remaps pipeline errors at an entry-access boundary: a structured API
    /// rejection becomes [`DriveError::ItemAccess`] for the named entry,
    /// everything else passes through.
    pub(crate) fn item_access(path: impl Into<String>, err: core_http::Error) -> Self {
        match err {
            core_http::Error::Api(source) => DriveError::ItemAccess {
                path: path.into(),
                source,
            },
            other => DriveError::Http(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, DriveError>;
