//! Streaming liveness session: one worker thread, one frame in flight.
//!
//! Admission is a bounded capacity-1 channel with a non-blocking send: while
//! an evaluation is in flight the slot fills up and further frames are
//! dropped on arrival. That bounds memory, keeps latency at one frame, and
//! guarantees the detector is never invoked concurrently with itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::artifact::domain::artifact_sink::{artifact_name, ArtifactSink};
use crate::pipeline::face_screener::FaceScreener;
use crate::pipeline::liveness_tracker::{LivenessTracker, TrackStep, TrackingState};
use crate::pipeline::results::LivenessResult;
use crate::preprocess::frame_normalizer::normalize_camera_frame;
use crate::shared::config::GateConfig;
use crate::shared::constants::FRAME_QUEUE_CAPACITY;
use crate::shared::frame::RawFrame;
use crate::shared::messages;

pub type LivenessCallback = Box<dyn Fn(LivenessResult) + Send>;

/// One tracking attempt over a camera stream.
///
/// Owns the worker thread and the single [`TrackingState`] for its lifetime.
/// The session is spent once a result with `Accepted` status has been
/// delivered; frames submitted after that are ignored.
pub struct CameraSession {
    frame_tx: Option<crossbeam_channel::Sender<RawFrame>>,
    released: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CameraSession {
    /// Spawns the evaluation worker. Results arrive on `on_result` from the
    /// worker thread.
    pub fn spawn(
        screener: FaceScreener,
        sink: Box<dyn ArtifactSink>,
        config: GateConfig,
        on_result: LivenessCallback,
    ) -> Self {
        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<RawFrame>(FRAME_QUEUE_CAPACITY);
        let released = Arc::new(AtomicBool::new(false));
        let flag = released.clone();
        let worker =
            std::thread::spawn(move || run_worker(frame_rx, screener, sink, config, on_result, flag));

        Self {
            frame_tx: Some(frame_tx),
            released,
            worker: Some(worker),
        }
    }

    /// Offers a frame for evaluation.
    ///
    /// Returns `false` when the frame was dropped: an evaluation is already
    /// in flight with the slot taken, or the session has finished. Dropping
    /// is the designed backpressure, not an error.
    pub fn submit_frame(&self, frame: RawFrame) -> bool {
        let Some(frame_tx) = &self.frame_tx else {
            return false;
        };
        match frame_tx.try_send(frame) {
            Ok(()) => true,
            Err(_) => {
                log::debug!("frame dropped, evaluation in flight");
                false
            }
        }
    }

    /// Stops accepting frames and joins the worker. An in-flight evaluation
    /// finishes first; whatever it reports is the caller's to discard.
    pub fn release(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.released.store(true, Ordering::Relaxed);
        self.frame_tx = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("camera session worker panicked");
            }
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    frame_rx: crossbeam_channel::Receiver<RawFrame>,
    mut screener: FaceScreener,
    sink: Box<dyn ArtifactSink>,
    config: GateConfig,
    on_result: LivenessCallback,
    released: Arc<AtomicBool>,
) {
    let tracker = LivenessTracker::new(config.clone());
    let mut state = TrackingState::default();

    for raw in frame_rx {
        if released.load(Ordering::Relaxed) {
            break;
        }
        // Undecodable frames vanish without an outcome.
        let Some(frame) = normalize_camera_frame(raw, &config) else {
            continue;
        };

        let outcome = screener.screen(&frame);
        match tracker.observe(&mut state, &outcome) {
            TrackStep::Rejected { message } => on_result(LivenessResult::rejected(message)),
            TrackStep::InProgress { progress } => on_result(LivenessResult::in_progress(progress)),
            TrackStep::Accepted { face } => {
                let name = artifact_name(face.timestamp_ms);
                match sink.save(&frame, &name) {
                    Ok(reference) => {
                        on_result(LivenessResult::accepted(config.progress_unit, reference))
                    }
                    Err(e) => {
                        log::error!("could not persist accepted capture: {e}");
                        on_result(LivenessResult::rejected(messages::MSG_SAVE_FAILED));
                    }
                }
                // Terminal either way: the tracking attempt is spent.
                break;
            }
        }
    }
}
