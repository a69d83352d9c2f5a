// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Thread-safe blocking FIFO queue

use crate::error::Error;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Thread-safe FIFO queue of ready work items.
///
/// `put` never blocks, `get` blocks while the queue is empty and returns
/// items in submission order. The queue holds both channel ends, so it stays
/// usable for as long as it is alive.
pub struct SyncQueue<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T: Send> SyncQueue<T> {
    pub fn new() -> SyncQueue<T> {
        let (sender, receiver) = unbounded();
        SyncQueue { sender, receiver }
    }

    /// Append an item without blocking.
    pub fn put(&self, item: T) -> Result<(), Error> {
        self.sender
            .send(item)
            .map_err(|_| Error::Channel("failed to enqueue item"))
    }

    /// Remove the oldest item, blocking while the queue is empty.
    pub fn get(&self) -> Result<T, Error> {
        self.receiver
            .recv()
            .map_err(|_| Error::Channel("failed to dequeue item"))
    }

    /// Best-effort emptiness check.
    ///
    /// The result may be stale by the time the caller acts on it. Usable as
    /// a heuristic trigger only, never for correctness decisions.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send> Default for SyncQueue<T> {
    fn default() -> SyncQueue<T> {
        SyncQueue::new()
    }
}
