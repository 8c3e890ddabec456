//! # Task Management System
//!
//! A small worker pool for executing one kind of [`Task`] off the foreground
//! thread.
//!
//! ## Architecture Overview
//!
//! - `TaskManager<T>`: Central coordinator for task distribution and worker management
//! - `TaskChannel<T>`: One worker thread with its own task channel and result channel
//!
//! Each worker owns a channel pair: the foreground is the only sender of tasks
//! and the only receiver of results, the worker is the only receiver of tasks
//! and the only sender of results. No other state is shared between threads.
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. A worker holding `max_tasks_in_flight` tasks is skipped; when every
//!    worker is full the task waits in a FIFO backlog
//! 4. Results are collected without blocking in `drain_completed()`, which
//!    also moves backlog tasks onto workers that freed up
//!
//! ## Inline Mode
//! With zero workers, published tasks stay in the backlog until
//! `run_pending_inline()` executes them on the calling thread. Their outputs
//! are then returned by the next `drain_completed()`.
//!
//! ## Example Usage
//! ```rust,ignore
//! let mut task_manager = TaskManager::new("mesh", 4, 1)?;
//!
//! // Publish a task for background processing
//! task_manager.publish_task(MyTask::new(...));
//!
//! // In your main/game loop:
//! for output in task_manager.drain_completed() {
//!     // ...
//! }
//! ```

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use task::Task;

use crate::core::error::Result;

/// A communication channel between the foreground thread and one worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks from the foreground to the worker
/// - `result_receiver`: Receives task outputs from the worker
/// - `num_tasks_in_flight`: Tasks sent whose output has not been drained yet
/// - `worker`: Handle to the worker thread, joined on drop
struct TaskChannel<T: Task> {
    task_sender: Option<Sender<T>>,
    result_receiver: Receiver<T::Output>,
    num_tasks_in_flight: usize,
    worker: Option<JoinHandle<()>>,
}

/// Manages a pool of worker threads executing tasks of type `T`.
///
/// # Fields
/// - `channels`: Set of active worker channels
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `completed_inline`: Outputs of tasks run by `run_pending_inline()`
/// - `current_channel`: Index for round-robin scheduling
///
/// # Implementation Notes
/// - Not `Sync`: one foreground thread owns the manager
/// - Drop-safe: closes every task channel, then joins the workers
pub struct TaskManager<T: Task> {
    name: &'static str,
    channels: Vec<TaskChannel<T>>,
    queued_tasks: VecDeque<T>,
    completed_inline: Vec<T::Output>,
    current_channel: usize,
    max_tasks_in_flight: usize,
}

impl<T: Task> TaskManager<T> {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `name` - Prefix for the worker thread names
    /// * `num_workers` - Number of worker threads; `0` selects inline mode
    /// * `max_tasks_in_flight` - Tasks a single worker may hold at once
    ///
    /// # Errors
    /// Returns an IO error if a worker thread cannot be spawned.
    pub fn new(name: &'static str, num_workers: usize, max_tasks_in_flight: usize) -> Result<Self> {
        let mut channels = Vec::with_capacity(num_workers);

        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<T>();
            let (result_tx, result_rx) = channel::<T::Output>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = thread::Builder::new()
                .name(format!("{name}-worker-{index}"))
                .spawn(task_closure)?;

            channels.push(TaskChannel {
                task_sender: Some(task_tx),
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                worker: Some(worker),
            });
        }

        info!(
            "Started {} task manager with {} workers (available parallelism: {:?})",
            name,
            num_workers,
            thread::available_parallelism()
        );

        Ok(TaskManager {
            name,
            channels,
            queued_tasks: VecDeque::new(),
            completed_inline: Vec::new(),
            current_channel: 0,
            max_tasks_in_flight: max_tasks_in_flight.max(1),
        })
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was successfully sent to the worker
    /// - `Err(task)` if the worker has disconnected, handing the task back
    fn try_send_task(&mut self, task: T, channel_idx: usize) -> std::result::Result<(), T> {
        let channel = &mut self.channels[channel_idx];
        let Some(sender) = channel.task_sender.as_ref() else {
            return Err(task);
        };
        match sender.send(task) {
            Ok(()) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(err) => {
                warn!("{} worker {} disconnected", self.name, channel_idx);
                channel.task_sender = None;
                Err(err.0)
            }
        }
    }

    /// Finds an available worker channel that can accept a new task.
    ///
    /// Round-robin starting from the last used channel; channels at their
    /// in-flight limit or disconnected are skipped.
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|step| (self.current_channel + step) % len)
            .find(|&idx| {
                let channel = &self.channels[idx];
                channel.task_sender.is_some()
                    && channel.num_tasks_in_flight < self.max_tasks_in_flight
            })
    }

    /// Publishes a new task for execution.
    ///
    /// Never blocks.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on a worker
    /// - `false` if the task was queued because all workers are busy (or in inline mode)
    pub fn publish_task(&mut self, task: T) -> bool {
        // Keep FIFO order: nothing overtakes the backlog.
        if !self.queued_tasks.is_empty() {
            self.queued_tasks.push_back(task);
            return false;
        }

        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(()) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Moves backlog tasks onto workers that have room, oldest first.
    pub fn process_queued_tasks(&mut self) {
        while !self.queued_tasks.is_empty() {
            let Some(channel_idx) = self.find_available_channel() else {
                break;
            };
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(()) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Collects every output that is ready, without blocking.
    ///
    /// The returned outputs are removed from the manager; a second call only
    /// returns what completed in between.
    pub fn drain_completed(&mut self) -> Vec<T::Output> {
        let mut completed = std::mem::take(&mut self.completed_inline);

        for (idx, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        completed.push(result);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        let was_running = channel.task_sender.take().is_some();
                        if was_running || channel.num_tasks_in_flight > 0 {
                            warn!(
                                "{} worker {} stopped, {} tasks lost",
                                self.name, idx, channel.num_tasks_in_flight
                            );
                        }
                        // every buffered result has been received by now
                        channel.num_tasks_in_flight = 0;
                        break;
                    }
                }
            }
        }

        self.process_queued_tasks();
        completed
    }

    /// Executes every backlog task on the calling thread.
    ///
    /// The outputs are returned by the next `drain_completed()`.
    ///
    /// # Returns
    /// The number of tasks executed.
    pub fn run_pending_inline(&mut self) -> usize {
        let count = self.queued_tasks.len();
        for task in self.queued_tasks.drain(..) {
            self.completed_inline.push(task.process());
        }
        if count > 0 {
            debug!("Ran {} {} tasks inline", count, self.name);
        }
        count
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.channels.len()
    }

    /// Tasks waiting in the backlog.
    pub fn queued_len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Tasks sent to workers whose output has not been drained.
    pub fn in_flight(&self) -> usize {
        self.channels.iter().map(|c| c.num_tasks_in_flight).sum()
    }

    /// Every task published and not yet drained, including inline outputs
    /// waiting for `drain_completed()`.
    pub fn pending_count(&self) -> usize {
        self.queued_len() + self.in_flight() + self.completed_inline.len()
    }
}

impl<T: Task> Drop for TaskManager<T> {
    fn drop(&mut self) {
        for channel in &mut self.channels {
            channel.task_sender = None;
        }
        for channel in &mut self.channels {
            if let Some(worker) = channel.worker.take() {
                if worker.join().is_err() {
                    warn!("{} worker panicked", self.name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    const POISON: u32 = u32::MAX;

    struct Square(u32);

    impl Task for Square {
        type Output = u32;

        fn process(self) -> u32 {
            assert_ne!(self.0, POISON, "poisoned task");
            self.0 * self.0
        }
    }

    fn drain_until(manager: &mut TaskManager<Square>, expected: usize) -> Vec<u32> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.len() < expected && Instant::now() < deadline {
            results.extend(manager.drain_completed());
            thread::sleep(Duration::from_millis(1));
        }
        results
    }

    #[test]
    fn test_workers_process_all_tasks() {
        let mut manager = TaskManager::new("square", 2, 1).unwrap();
        for i in 0..10 {
            manager.publish_task(Square(i));
        }

        let mut results = drain_until(&mut manager, 10);
        results.sort_unstable();
        assert_eq!(results, (0..10).map(|i| i * i).collect::<Vec<_>>());
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn test_in_flight_limit_queues_tasks() {
        let mut manager = TaskManager::new("square", 1, 1).unwrap();
        assert!(manager.publish_task(Square(1)));
        assert!(!manager.publish_task(Square(2)));
        assert!(!manager.publish_task(Square(3)));

        // in-flight only drops when the foreground drains
        assert_eq!(manager.in_flight(), 1);
        assert_eq!(manager.queued_len(), 2);

        let results = drain_until(&mut manager, 3);
        assert_eq!(results, vec![1, 4, 9]);
    }

    #[test]
    fn test_inline_mode_runs_only_on_request() {
        let mut manager = TaskManager::new("square", 0, 1).unwrap();
        assert!(!manager.publish_task(Square(3)));
        assert!(!manager.publish_task(Square(4)));
        assert!(manager.drain_completed().is_empty());
        assert_eq!(manager.pending_count(), 2);

        assert_eq!(manager.run_pending_inline(), 2);
        assert_eq!(manager.pending_count(), 2);
        assert_eq!(manager.drain_completed(), vec![9, 16]);
        assert!(manager.drain_completed().is_empty());
        assert_eq!(manager.pending_count(), 0);
    }

    #[test]
    fn test_stopped_worker_releases_its_tasks() {
        let mut manager = TaskManager::new("square", 1, 2).unwrap();
        assert_eq!(manager.worker_count(), 1);
        assert!(manager.publish_task(Square(POISON)));

        let deadline = Instant::now() + Duration::from_secs(10);
        while manager.pending_count() > 0 && Instant::now() < deadline {
            assert!(manager.drain_completed().is_empty());
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(manager.in_flight(), 0);
        assert_eq!(manager.pending_count(), 0);

        // no live worker is left, so new tasks wait in the backlog
        assert!(!manager.publish_task(Square(2)));
        assert_eq!(manager.queued_len(), 1);
    }

    #[test]
    fn test_drop_joins_workers() {
        let mut manager = TaskManager::new("square", 3, 2).unwrap();
        for i in 0..20 {
            manager.publish_task(Square(i));
        }
        drop(manager);
    }
}
