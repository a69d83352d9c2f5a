// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Task payloads and the ready-queue item type

/// A ready-to-run unit of work.
///
/// Ownership is transferred to the work queue on enqueue. The task is
/// executed exactly once by exactly one worker, or never if the queue shuts
/// down before it has been popped.
pub type Task = Box<dyn FnOnce() + Send>;

/// A deferred, splittable unit of work.
///
/// The argument is the fan-out degree chosen at split time. The task is
/// expected to enqueue its sub-tasks itself, typically through a
/// [WorkQueueHandle](crate::work_queue::WorkQueueHandle) captured at
/// submission time. It is invoked exactly once by whichever thread performs
/// the split pass that drains it.
pub type BundledTask = Box<dyn FnOnce(usize) + Send>;

/// Item transported on the ready queue.
///
/// `Shutdown` is the termination sentinel, one per worker; it never
/// represents real work.
pub(crate) enum TaskItem {
    Run(Task),
    Shutdown,
}
