//! Synchronization primitives.
//!
//! Re-exports tokio's async-aware primitives for use inside the runtime, and
//! provides [`AsyncResult`], the one blocking primitive in the workspace: a
//! write-once cell that carries a completed operation's result out of the
//! runtime to a synchronous consumer.

pub use tokio::sync::{
    broadcast, mpsc, oneshot, watch, Mutex, MutexGuard, Notify, RwLock, RwLockReadGuard,
    RwLockWriteGuard,
};

use std::sync::{Condvar, Mutex as StdMutex};

/// A single-slot, write-once, blocking-read result cell.
///
/// Bridges async completion to synchronous call sites (tests, scripts, host
/// threads without a runtime handle): a spawned task calls [`set`] when the
/// operation finishes, and any number of blocked threads in [`wait`] wake up
/// and observe the same value.
///
/// Semantics:
/// - [`wait`] blocks the calling thread until a value has been set. There is
///   no built-in timeout; bounding the operation is the caller's job (e.g.
///   via the per-request timeout passed into the operation itself).
/// - A second [`set`] overwrites the first. That is caller misuse, tolerated
///   without panicking; waiters that already consumed the first value are
///   unaffected.
/// - All concurrent waiters are woken and each receives a clone of the value.
///
/// [`set`]: AsyncResult::set
/// [`wait`]: AsyncResult::wait
///
/// # Examples
///
/// ```rust
/// use core_async::sync::AsyncResult;
/// use std::sync::Arc;
///
/// let cell = Arc::new(AsyncResult::new());
/// let setter = cell.clone();
///
/// std::thread::spawn(move || setter.set(42));
/// assert_eq!(cell.wait(), 42);
/// ```
pub struct AsyncResult<T> {
    slot: StdMutex<Option<T>>,
    ready: Condvar,
}

impl<T> AsyncResult<T> {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self {
            slot: StdMutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Stores the result and wakes every waiter.
    pub fn set(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value);
        self.ready.notify_all();
    }

    /// Returns `true` once a value has been set.
    pub fn is_set(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl<T: Clone> AsyncResult<T> {
    /// Blocks the calling thread until a value is available, then returns it.
    ///
    /// Blocks indefinitely if [`set`](AsyncResult::set) is never called.
    pub fn wait(&self) -> T {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(value) = slot.as_ref() {
                return value.clone();
            }
            slot = self.ready.wait(slot).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Returns the value if one has been set, without blocking.
    pub fn try_get(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl<T> Default for AsyncResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for AsyncResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncResult")
            .field("set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_set_then_wait() {
        let cell = AsyncResult::new();
        cell.set("done".to_string());
        assert_eq!(cell.wait(), "done");
        // A second wait observes the same value
        assert_eq!(cell.wait(), "done");
    }

    #[test]
    fn test_try_get_before_and_after_set() {
        let cell = AsyncResult::new();
        assert_eq!(cell.try_get(), None);
        assert!(!cell.is_set());

        cell.set(7);
        assert_eq!(cell.try_get(), Some(7));
        assert!(cell.is_set());
    }

    #[test]
    fn test_wait_blocks_until_set() {
        let cell = Arc::new(AsyncResult::new());
        let setter = cell.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            setter.set(99u32);
        });

        // wait() is entered before the setter fires
        assert_eq!(cell.wait(), 99);
        handle.join().unwrap();
    }

    #[test]
    fn test_multiple_waiters_observe_same_value() {
        let cell = Arc::new(AsyncResult::new());

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let cell = cell.clone();
                thread::spawn(move || cell.wait())
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        cell.set("shared".to_string());

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), "shared");
        }
    }

    #[test]
    fn test_overwrite_is_tolerated() {
        let cell = AsyncResult::new();
        cell.set(1);
        cell.set(2);
        assert_eq!(cell.wait(), 2);
    }

    #[test]
    fn test_bridges_async_completion_to_blocking_consumer() {
        let cell = Arc::new(AsyncResult::new());
        let setter = cell.clone();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        runtime.spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            setter.set(Ok::<_, String>("token".to_string()));
        });

        assert_eq!(cell.wait(), Ok("token".to_string()));
    }
}
