// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use log::info;
use std::sync::{mpsc, Arc};
use workq::prelude::*;

const TOTAL_SIZE: usize = 8 * 1024 * 1024;

fn main() {
    env_logger::init();

    let queue = Builder::new().build().expect("failed to build work queue");
    let handle = queue.handle();

    info!(
        "Copying {} bytes with {} worker(s)",
        TOTAL_SIZE,
        queue.worker_count()
    );

    let source: Arc<Vec<u8>> = Arc::new((0..TOTAL_SIZE).map(|i| i as u8).collect());
    let (result_sender, result_receiver) = mpsc::channel();

    // Submit a single bundled task; the queue decides the fan-out based on
    // the share of the worker pool it may occupy.
    let task_source = source.clone();
    queue
        .add_bundled_task(move |fan_out| {
            let chunk_size = TOTAL_SIZE.div_ceil(fan_out);
            let mut offset = 0;
            while offset < TOTAL_SIZE {
                let start = offset;
                let end = (offset + chunk_size).min(TOTAL_SIZE);
                let source = task_source.clone();
                let sender = result_sender.clone();
                handle
                    .add_task(move || {
                        let mut buffer = vec![0u8; end - start];
                        buffer.copy_from_slice(&source[start..end]);
                        sender
                            .send((start, buffer))
                            .expect("failed to send copied chunk");
                    })
                    .expect("failed to add copy task");
                offset = end;
            }
        })
        .expect("failed to add bundled task");

    // Reassemble the chunks as the workers finish them.
    let mut destination = vec![0u8; TOTAL_SIZE];
    let mut received = 0;
    while received < TOTAL_SIZE {
        let (start, buffer) = result_receiver.recv().expect("failed to receive chunk");
        received += buffer.len();
        destination[start..start + buffer.len()].copy_from_slice(&buffer);
    }

    assert_eq!(destination, *source);
    info!("Copied {} bytes", received);
}
