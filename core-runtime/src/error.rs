use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),

    #[error("Invalid log filter directive: {0}")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
