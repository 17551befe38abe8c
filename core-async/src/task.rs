//! Task spawning and execution.

pub use tokio::task::{spawn, spawn_blocking, yield_now, JoinHandle};
