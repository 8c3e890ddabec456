//! # Task System Core Trait
//!
//! This module defines the unit of work executed by a
//! [`TaskManager`](super::TaskManager).
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread (or inline)
//! 3. The task's `Output` is sent back over the worker's result channel
//! 4. The foreground drains outputs with `TaskManager::drain_completed()`
//!
//! ## Thread Safety
//! - `Task` and its `Output` must be `Send` to cross the worker channels
//! - A task owns all the data it reads; shared inputs are passed as `Arc`s to
//!   immutable data, so no locking happens inside `process()`

/// A unit of work that can be executed on a background worker.
///
/// # Implementation Guidelines
/// - Should be relatively coarse-grained to amortize scheduling overhead
/// - Must not hold references to data the foreground may mutate
/// - Should be total: a task that cannot fail never needs retry logic
pub trait Task: Send + 'static {
    /// The value sent back to the foreground when the task completes.
    type Output: Send + 'static;

    /// Performs the work. Runs on a worker thread, or on the caller's thread
    /// in inline mode.
    fn process(self) -> Self::Output;
}
