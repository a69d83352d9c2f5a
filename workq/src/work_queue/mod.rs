// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

mod queue;
mod worker;

pub use queue::{WorkQueue, WorkQueueHandle};
pub use worker::WorkerId;
