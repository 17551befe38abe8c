//! Runtime infrastructure for the drive client core.
//!
//! Hosts configure process-wide concerns here; currently that is the
//! structured logging setup shared by every crate in the workspace.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
