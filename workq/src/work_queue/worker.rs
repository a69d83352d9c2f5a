// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::queue::Shared;
use crate::task::TaskItem;
use log::debug;
use std::fmt::Display;
use std::sync::Arc;
use std::thread;
use tracing::{span, Level};

/// Worker id type. This id is unique to each worker thread.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct WorkerId(usize);

impl From<usize> for WorkerId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<&WorkerId> for usize {
    fn from(value: &WorkerId) -> Self {
        value.0
    }
}

impl From<WorkerId> for usize {
    fn from(value: WorkerId) -> Self {
        value.0
    }
}

impl Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// A worker thread that executes queued tasks.
pub struct Worker {
    id: WorkerId,
    thread: thread::JoinHandle<()>,
}

impl Worker {
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Create a new worker thread that will drain the shared queues.
    ///
    /// This function spawns a new thread.
    pub(crate) fn new(id: WorkerId, stack_size: Option<usize>, shared: Arc<Shared>) -> Worker {
        let thread_name = format!("workq-{id}").to_lowercase();
        let mut builder = thread::Builder::new().name(thread_name.clone());
        if let Some(stack_size) = stack_size {
            builder = builder.stack_size(stack_size);
        }
        let thread = builder
            .spawn(move || {
                run(id, thread_name, shared);
            })
            .expect("could not spawn thread");

        Worker { id, thread }
    }

    /// Wait for the worker thread to terminate.
    pub(crate) fn join(self) -> thread::Result<()> {
        self.thread.join()
    }
}

/// Worker thread main function
fn run(wid: WorkerId, thread_name: String, shared: Arc<Shared>) {
    loop {
        // The emptiness check is advisory: a stale result delays a split or
        // triggers a redundant one, both absorbed by the split pass itself.
        if shared.ready_queue().is_empty() {
            shared.split_bundled_tasks();
        }

        let item = shared
            .ready_queue()
            .get()
            .expect("failed to receive task in worker");
        match item {
            TaskItem::Run(task) => {
                debug!("Running task in worker {wid} (thread {thread_name})");
                let _span = span!(Level::TRACE, "Run", worker_id = %wid).entered();
                task();
            }
            TaskItem::Shutdown => {
                debug!("Stopping worker {wid} (thread {thread_name})");
                break;
            }
        }
    }
}
