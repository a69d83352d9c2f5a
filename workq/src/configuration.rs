// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Work queue builder

use crate::error::Error;
use crate::work_queue::WorkQueue;
use std::thread;

/// Configuration of a work queue
#[derive(Default)]
pub struct Builder {
    /// Number of worker threads
    worker_count: Option<usize>,
    /// Workers' stack size
    stack_size: Option<usize>,
}

/// Work queue builder
impl Builder {
    /// Create a builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    /// Defaults to the available parallelism of the host.
    pub fn worker_count(&mut self, worker_count: usize) -> &mut Self {
        self.worker_count = Some(worker_count);
        self
    }

    /// Set worker threads' stack size
    pub fn stack_size(&mut self, stack_size: usize) -> &mut Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Build an initialized work queue using the given parameters.
    pub fn build(&self) -> Result<WorkQueue, Error> {
        let worker_count = self.worker_count.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|count| count.get())
                .unwrap_or(1)
        });
        let queue = WorkQueue::with_stack_size(self.stack_size);
        queue.initialize(worker_count)?;
        Ok(queue)
    }
}
