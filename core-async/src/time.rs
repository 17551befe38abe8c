//! Time-related abstractions.
//!
//! Thin facade over tokio's timer wheel plus the standard duration types.
//!
//! # Examples
//!
//! ```rust
//! use core_async::time::{sleep, Duration, Instant};
//!
//! async fn example() {
//!     let start = Instant::now();
//!
//!     sleep(Duration::from_millis(10)).await;
//!
//!     let elapsed = start.elapsed();
//!     println!("Took {:?}", elapsed);
//! }
//! ```

pub use tokio::time::{interval, sleep, sleep_until, timeout, Interval, Sleep, Timeout};

pub use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
