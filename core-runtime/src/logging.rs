//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack for host applications:
//! - Pretty or JSON output formats
//! - Module-level filtering via env-filter directives
//!
//! Secrets (tokens, device codes) are never logged by the core crates; the
//! subscriber configured here only controls verbosity and format.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LoggingConfig::default()
//!         .with_format(LogFormat::Pretty)
//!         .with_level(tracing::Level::DEBUG);
//!
//!     init_logging(config).expect("Failed to initialize logging");
//!
//!     tracing::info!("Application started");
//! }
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output for development.
    #[default]
    Pretty,
    /// Newline-delimited JSON for log aggregation.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    level: Level,
    format: LogFormat,
    /// Raw env-filter directives; overrides `level` when set
    /// (e.g. `"core_auth=debug,info"`).
    filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        match &self.filter {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|e| Error::InvalidFilter(e.to_string()))
            }
            None => Ok(EnvFilter::default().add_directive(self.level.into())),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// May be called at most once per process; a second call fails with
/// [`Error::LoggingInit`] and leaves the original subscriber in place.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = config.env_filter()?;

    let result = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| Error::LoggingInit(e.to_string()))
}
