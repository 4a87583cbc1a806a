//! Background worker for one-shot photo evaluations: a bounded FIFO queue,
//! ordered delivery, and a release that discards pending work.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::pipeline::results::StillResult;
use crate::pipeline::still_photo_use_case::StillPhotoUseCase;
use crate::shared::constants::STILL_QUEUE_CAPACITY;

pub type StillCallback = Box<dyn Fn(StillResult) + Send>;

/// Serializes still-photo evaluations onto one worker thread.
///
/// Requests queue in arrival order; a full queue refuses new work rather
/// than blocking the caller.
pub struct StillSession {
    request_tx: Option<crossbeam_channel::Sender<PathBuf>>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl StillSession {
    pub fn spawn(use_case: StillPhotoUseCase, on_result: StillCallback) -> Self {
        let (request_tx, request_rx) =
            crossbeam_channel::bounded::<PathBuf>(STILL_QUEUE_CAPACITY);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let worker = std::thread::spawn(move || run_worker(request_rx, use_case, on_result, flag));

        Self {
            request_tx: Some(request_tx),
            cancelled,
            worker: Some(worker),
        }
    }

    /// Enqueues a photo for evaluation; `false` when the queue is full or
    /// the session is released.
    pub fn submit(&self, path: impl Into<PathBuf>) -> bool {
        let Some(request_tx) = &self.request_tx else {
            return false;
        };
        match request_tx.try_send(path.into()) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("still photo request refused, queue full or session released");
                false
            }
        }
    }

    /// Stops the worker. The evaluation in progress finishes; queued
    /// requests are discarded, not completed.
    pub fn release(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.request_tx = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("still session worker panicked");
            }
        }
    }
}

impl Drop for StillSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    request_rx: crossbeam_channel::Receiver<PathBuf>,
    mut use_case: StillPhotoUseCase,
    on_result: StillCallback,
    cancelled: Arc<AtomicBool>,
) {
    for path in request_rx {
        if cancelled.load(Ordering::Relaxed) {
            break;
        }
        on_result(use_case.evaluate_path(&path));
    }
}
