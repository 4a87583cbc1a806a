use ndarray::Array2;
use thiserror::Error;

use crate::shared::bounding_box::BoundingBox;

/// Sliding-window detector configuration, matching the cascade-classifier
/// parameter model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectParams {
    /// Pyramid scale step between detection passes.
    pub scale_factor: f64,
    /// Minimum neighboring hits required to keep a candidate.
    pub min_neighbors: u32,
    /// Smallest object considered, (width, height) in pixels.
    pub min_size: (u32, u32),
}

impl DetectParams {
    /// Whole-image frontal face search.
    pub const FACES: DetectParams = DetectParams {
        scale_factor: 1.1,
        min_neighbors: 8,
        min_size: (60, 60),
    };

    /// Mouth search within the lower half of a face.
    pub const MOUTHS: DetectParams = DetectParams {
        scale_factor: 1.1,
        min_neighbors: 12,
        min_size: (30, 30),
    };
}

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("detector model could not be loaded: {0}")]
    ModelLoad(String),
    #[error("detection backend failed: {0}")]
    Backend(String),
}

/// Domain interface for the external detection capability.
///
/// Implementations may keep mutable backend state, hence `&mut self`.
/// Returned boxes are in full-image coordinates even when `region` restricts
/// the search window.
pub trait ObjectDetector: Send {
    fn detect(
        &mut self,
        image: &Array2<u8>,
        region: BoundingBox,
        params: &DetectParams,
    ) -> Result<Vec<BoundingBox>, DetectorError>;
}
