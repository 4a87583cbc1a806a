//! One-shot still-photo gate: load → screen → size bounds → byte budget →
//! persist. No temporal state.

use std::path::Path;

use crate::artifact::domain::artifact_sink::{artifact_name, ArtifactSink};
use crate::detection::domain::screen_outcome::ScreenStatus;
use crate::pipeline::face_screener::FaceScreener;
use crate::pipeline::results::{rejection_message, StillResult};
use crate::preprocess::still_loader;
use crate::shared::config::GateConfig;
use crate::shared::frame::Frame;
use crate::shared::messages;

pub struct StillPhotoUseCase {
    screener: FaceScreener,
    sink: Box<dyn ArtifactSink>,
    config: GateConfig,
}

impl StillPhotoUseCase {
    pub fn new(screener: FaceScreener, sink: Box<dyn ArtifactSink>, config: GateConfig) -> Self {
        Self {
            screener,
            sink,
            config,
        }
    }

    /// Gates a photo file. Unreadable files surface as an ordinary
    /// rejection, never as an error.
    pub fn evaluate_path(&mut self, path: &Path) -> StillResult {
        let frame = match still_loader::load_oriented(path) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("still photo {} rejected: {e}", path.display());
                return StillResult::rejected(messages::MSG_UNREADABLE_PHOTO);
            }
        };
        self.evaluate_frame(frame)
    }

    /// Gates an already-decoded image.
    pub fn evaluate_frame(&mut self, frame: Frame) -> StillResult {
        let outcome = self.screener.screen(&frame);
        let Some(face) = outcome.face.as_ref() else {
            return StillResult::rejected(rejection_message(outcome.status));
        };
        debug_assert_eq!(outcome.status, ScreenStatus::Ok);

        // Size bounds are their own rejection; a too-small face must not
        // read as a sharpness problem.
        if !self.config.face_in_bounds(&face.bounds) {
            log::debug!(
                "face {}x{} outside size bounds",
                face.bounds.width,
                face.bounds.height
            );
            return StillResult::rejected(messages::MSG_FACE_SIZE);
        }

        let name = artifact_name(face.timestamp_ms);
        let fitted = still_loader::fit_byte_budget(frame, self.config.photo_byte_limit);
        match self.sink.save(&fitted, &name) {
            Ok(reference) => StillResult::accepted(reference),
            Err(e) => {
                log::error!("could not persist accepted photo: {e}");
                StillResult::rejected(messages::MSG_SAVE_FAILED)
            }
        }
    }
}
