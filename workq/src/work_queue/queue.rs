// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::worker::{Worker, WorkerId};
use crate::error::Error;
use crate::queue::SyncQueue;
use crate::task::{BundledTask, Task, TaskItem};
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// State shared between the work queue, its handles and the worker threads.
pub(crate) struct Shared {
    ready_queue: SyncQueue<TaskItem>,
    bundle_queue: Mutex<VecDeque<BundledTask>>,
    worker_count: AtomicUsize,
}

impl Shared {
    fn new() -> Shared {
        Shared {
            ready_queue: SyncQueue::new(),
            bundle_queue: Mutex::new(VecDeque::new()),
            worker_count: AtomicUsize::new(0),
        }
    }

    pub(crate) fn ready_queue(&self) -> &SyncQueue<TaskItem> {
        &self.ready_queue
    }

    fn worker_count(&self) -> usize {
        self.worker_count.load(Ordering::Acquire)
    }

    fn add_task(&self, task: Task) -> Result<(), Error> {
        if self.worker_count() == 0 {
            return Err(Error::Unavailable(
                "work queue must be initialized before adding a task",
            ));
        }
        self.ready_queue.put(TaskItem::Run(task))
    }

    fn add_bundled_task(&self, task: BundledTask) -> Result<(), Error> {
        if self.worker_count() == 0 {
            return Err(Error::Unavailable(
                "work queue must be initialized before adding a task",
            ));
        }
        {
            let mut bundle_queue = self.bundle_queue.lock().expect("bundle queue lock poisoned");
            bundle_queue.push_back(task);
        }
        // Advisory check: if no ready tasks are pending, split on the calling
        // thread instead of waiting for a worker to run dry.
        if self.ready_queue.is_empty() {
            self.split_bundled_tasks();
        }
        Ok(())
    }

    /// Convert pending bundled tasks into ready tasks.
    ///
    /// The whole bundle queue is swapped out under its lock. A caller finding
    /// the queue already empty lost the race to a concurrent split pass and
    /// has nothing to do, so no bundled task is ever split twice. Each task of
    /// the drained batch receives a proportional share of the worker pool as
    /// its fan-out degree, at least 1.
    pub(crate) fn split_bundled_tasks(&self) {
        let mut local_queue = VecDeque::new();
        {
            let mut bundle_queue = self.bundle_queue.lock().expect("bundle queue lock poisoned");
            if !bundle_queue.is_empty() {
                std::mem::swap(&mut *bundle_queue, &mut local_queue);
            }
        }
        if local_queue.is_empty() {
            return;
        }

        let fan_out = (self.worker_count() / local_queue.len()).max(1);
        debug!(
            "Splitting {} bundled task(s) with fan-out {fan_out}",
            local_queue.len()
        );

        // No lock is held here, so a task may call add_task freely.
        for task in local_queue {
            task(fan_out);
        }
    }
}

/// Dispatcher for asynchronous worker threads.
///
/// Accelerates independent short operations, for example parallel memory
/// copies, by distributing them across a fixed set of background threads.
/// Call [initialize](WorkQueue::initialize) once to start the workers, then
/// submit work with [add_task](WorkQueue::add_task) and
/// [add_bundled_task](WorkQueue::add_bundled_task). Dropping the queue pushes
/// one shutdown sentinel per worker and joins all worker threads; tasks still
/// queued behind the sentinels are discarded.
pub struct WorkQueue {
    shared: Arc<Shared>,
    stack_size: Option<usize>,
    workers: Mutex<Vec<Worker>>,
}

impl WorkQueue {
    /// Create a work queue without any worker threads.
    pub fn new() -> WorkQueue {
        Self::with_stack_size(None)
    }

    /// Create a work queue whose workers will use the given stack size.
    pub fn with_stack_size(stack_size: Option<usize>) -> WorkQueue {
        WorkQueue {
            shared: Arc::new(Shared::new()),
            stack_size,
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Start `worker_count` worker threads.
    ///
    /// The worker set is created at most once: a repeated call finds the
    /// workers already present and returns without resizing the pool.
    pub fn initialize(&self, worker_count: usize) -> Result<(), Error> {
        if worker_count < 1 {
            return Err(Error::InvalidArgument(
                "work queue must be initialized with a positive worker count",
            ));
        }
        let mut workers = self.workers.lock().expect("worker list lock poisoned");
        if workers.is_empty() {
            debug!("Starting {worker_count} worker thread(s)");
            for id in 0..worker_count {
                workers.push(Worker::new(
                    WorkerId::from(id),
                    self.stack_size,
                    self.shared.clone(),
                ));
            }
            self.shared.worker_count.store(worker_count, Ordering::Release);
        }
        Ok(())
    }

    /// Get the number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.shared.worker_count()
    }

    /// Add a task to the queue. The queue takes ownership of `task`.
    pub fn add_task<T>(&self, task: T) -> Result<(), Error>
    where
        T: FnOnce() + Send + 'static,
    {
        self.shared.add_task(Box::new(task))
    }

    /// Add a bundled task to the queue.
    ///
    /// The queue decides how many sub-tasks to divide the bundled task into
    /// and calls `task` with that amount as the argument. `task` should set up
    /// and assign the sub-tasks by calling `add_task`, typically through a
    /// captured [WorkQueueHandle].
    pub fn add_bundled_task<T>(&self, task: T) -> Result<(), Error>
    where
        T: FnOnce(usize) + Send + 'static,
    {
        self.shared.add_bundled_task(Box::new(task))
    }

    /// Create a cloneable producer handle to this work queue.
    pub fn handle(&self) -> WorkQueueHandle {
        WorkQueueHandle {
            shared: self.shared.clone(),
        }
    }
}

impl Default for WorkQueue {
    fn default() -> WorkQueue {
        WorkQueue::new()
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        let workers = std::mem::take(&mut *self.workers.lock().expect("worker list lock poisoned"));
        // One sentinel per worker; each worker consumes exactly one.
        for _ in 0..workers.len() {
            let _ = self.shared.ready_queue.put(TaskItem::Shutdown);
        }
        for worker in workers {
            let id = worker.id();
            if worker.join().is_err() {
                warn!("Worker {id} was terminated by a panicking task");
            }
        }
        // Surviving handles observe an uninitialized queue from here on.
        self.shared.worker_count.store(0, Ordering::Release);
    }
}

/// Producer surface of a [WorkQueue].
///
/// Handles are cheap to clone and can be captured by bundled tasks to enqueue
/// their sub-tasks. A handle outliving its work queue reports the pool as
/// unavailable instead of accepting work that can no longer run.
#[derive(Clone)]
pub struct WorkQueueHandle {
    shared: Arc<Shared>,
}

impl WorkQueueHandle {
    /// Get the number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.shared.worker_count()
    }

    /// Add a task to the queue. The queue takes ownership of `task`.
    pub fn add_task<T>(&self, task: T) -> Result<(), Error>
    where
        T: FnOnce() + Send + 'static,
    {
        self.shared.add_task(Box::new(task))
    }

    /// Add a bundled task to the queue.
    pub fn add_bundled_task<T>(&self, task: T) -> Result<(), Error>
    where
        T: FnOnce(usize) + Send + 'static,
    {
        self.shared.add_bundled_task(Box::new(task))
    }
}
