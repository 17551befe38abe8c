//! Async runtime facade for the drive client core.
//!
//! All core-* and provider-* crates depend on this crate instead of directly
//! depending on tokio, keeping the runtime choice in one place.
//!
//! # Modules
//!
//! - `task`: Task spawning and execution
//! - `time`: Time-related operations (sleep, timeout, duration)
//! - `sync`: Synchronization primitives, including [`sync::AsyncResult`], the
//!   blocking bridge from async completion to synchronous call sites

pub mod sync;
pub mod task;
pub mod time;

// Re-export commonly used items at crate root for convenience
pub use task::spawn;
pub use time::{sleep, Duration, Instant};
