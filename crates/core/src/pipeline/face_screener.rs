//! The screening sequence shared by both entry points: face detection,
//! mouth visibility, sharpness.

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::object_detector::{DetectParams, ObjectDetector};
use crate::detection::domain::screen_outcome::{ScreenOutcome, ScreenStatus};
use crate::quality::sharpness;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::{now_millis, Frame};

/// Composes the external face and mouth detectors with the sharpness gate.
///
/// Constructed once per session and handed to it whole; a detector that
/// fails at runtime fails closed (no face) instead of surfacing an error.
pub struct FaceScreener {
    faces: Box<dyn ObjectDetector>,
    mouths: Box<dyn ObjectDetector>,
    face_params: DetectParams,
    mouth_params: DetectParams,
    sharpness_threshold: f64,
}

impl FaceScreener {
    pub fn new(
        faces: Box<dyn ObjectDetector>,
        mouths: Box<dyn ObjectDetector>,
        sharpness_threshold: f64,
    ) -> Self {
        Self {
            faces,
            mouths,
            face_params: DetectParams::FACES,
            mouth_params: DetectParams::MOUTHS,
            sharpness_threshold,
        }
    }

    /// Overrides the default detector parameter sets.
    pub fn with_params(mut self, face_params: DetectParams, mouth_params: DetectParams) -> Self {
        self.face_params = face_params;
        self.mouth_params = mouth_params;
        self
    }

    /// Runs the full sequence over one normalized image.
    ///
    /// Absolute face-size bounds are deliberately not checked here; they
    /// belong to the callers of `Ok` outcomes.
    pub fn screen(&mut self, frame: &Frame) -> ScreenOutcome {
        let gray = frame.to_luma();
        let whole = BoundingBox::full_image(frame.width(), frame.height());

        let faces = match self.faces.detect(&gray, whole, &self.face_params) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("face detector unavailable, failing closed: {e}");
                return ScreenOutcome::rejected(ScreenStatus::NoFace);
            }
        };
        log::debug!("count of detected faces: {}", faces.len());
        if faces.len() > 1 {
            return ScreenOutcome::rejected(ScreenStatus::MultiFace);
        }
        let Some(&face) = faces.first() else {
            return ScreenOutcome::rejected(ScreenStatus::NoFace);
        };

        let mouths = match self.mouths.detect(&gray, face.lower_half(), &self.mouth_params) {
            Ok(mouths) => mouths,
            Err(e) => {
                log::warn!("mouth detector unavailable, failing closed: {e}");
                return ScreenOutcome::rejected(ScreenStatus::NoFace);
            }
        };
        log::debug!("count of detected mouths: {}", mouths.len());
        if mouths.is_empty() {
            return ScreenOutcome::rejected(ScreenStatus::NoMouth);
        }

        let score = sharpness::mean_gradient_magnitude(&gray, face);
        log::debug!("face sharpness: {score:.2}");
        if score <= self.sharpness_threshold {
            return ScreenOutcome::not_sharp(score);
        }

        ScreenOutcome::ok(DetectedFace::new(face, now_millis()), score)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Detector stubs shared by pipeline tests.

    use std::sync::{Arc, Mutex};

    use ndarray::Array2;

    use crate::detection::domain::object_detector::{
        DetectParams, DetectorError, ObjectDetector,
    };
    use crate::shared::bounding_box::BoundingBox;

    /// Returns a fixed script of hit lists, one per call, repeating the last.
    pub struct ScriptedDetector {
        script: Vec<Vec<BoundingBox>>,
        call: usize,
        pub seen_regions: Arc<Mutex<Vec<BoundingBox>>>,
        pub seen_params: Arc<Mutex<Vec<DetectParams>>>,
    }

    impl ScriptedDetector {
        pub fn new(script: Vec<Vec<BoundingBox>>) -> Self {
            Self {
                script,
                call: 0,
                seen_regions: Arc::new(Mutex::new(Vec::new())),
                seen_params: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn always(hits: Vec<BoundingBox>) -> Self {
            Self::new(vec![hits])
        }
    }

    impl ObjectDetector for ScriptedDetector {
        fn detect(
            &mut self,
            _image: &Array2<u8>,
            region: BoundingBox,
            params: &DetectParams,
        ) -> Result<Vec<BoundingBox>, DetectorError> {
            self.seen_regions.lock().unwrap().push(region);
            self.seen_params.lock().unwrap().push(*params);
            let idx = self.call.min(self.script.len().saturating_sub(1));
            self.call += 1;
            Ok(self.script.get(idx).cloned().unwrap_or_default())
        }
    }

    /// Always fails, modeling an uninitialized backend.
    pub struct BrokenDetector;

    impl ObjectDetector for BrokenDetector {
        fn detect(
            &mut self,
            _image: &Array2<u8>,
            _region: BoundingBox,
            _params: &DetectParams,
        ) -> Result<Vec<BoundingBox>, DetectorError> {
            Err(DetectorError::Backend("stub backend down".into()))
        }
    }
}
