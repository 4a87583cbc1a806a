use ndarray::Array2;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::object_detector::{DetectParams, DetectorError, ObjectDetector};
use crate::shared::bounding_box::BoundingBox;

/// Haar-cascade detector backed by OpenCV's `CascadeClassifier`.
///
/// One instance wraps one trained cascade (frontal face, mouth, ...); the
/// screening pipeline composes two of them. The classifier is not
/// reentrant, which the session worker model already guarantees.
pub struct CascadeObjectDetector {
    classifier: CascadeClassifier,
}

impl CascadeObjectDetector {
    /// Loads a cascade XML file from disk.
    pub fn from_file(path: &str) -> Result<Self, DetectorError> {
        let classifier = CascadeClassifier::new(path)
            .map_err(|e| DetectorError::ModelLoad(format!("{path}: {e}")))?;
        let empty = classifier
            .empty()
            .map_err(|e| DetectorError::ModelLoad(format!("{path}: {e}")))?;
        if empty {
            return Err(DetectorError::ModelLoad(format!(
                "{path}: cascade file contains no stages"
            )));
        }
        Ok(Self { classifier })
    }
}

impl ObjectDetector for CascadeObjectDetector {
    fn detect(
        &mut self,
        image: &Array2<u8>,
        region: BoundingBox,
        params: &DetectParams,
    ) -> Result<Vec<BoundingBox>, DetectorError> {
        let (rows, cols) = image.dim();
        let search = region.clamped_to(cols as u32, rows as u32);
        if search.is_empty() {
            return Ok(Vec::new());
        }

        let data = image
            .as_slice()
            .ok_or_else(|| DetectorError::Backend("grayscale plane is not contiguous".into()))?;
        let mat = Mat::new_rows_cols_with_data(rows as i32, cols as i32, data)
            .map_err(|e| DetectorError::Backend(e.to_string()))?;
        let roi = Mat::roi(
            &mat,
            Rect::new(search.x, search.y, search.width, search.height),
        )
        .map_err(|e| DetectorError::Backend(e.to_string()))?;

        let mut hits = Vector::<Rect>::new();
        self.classifier
            .detect_multi_scale(
                &roi,
                &mut hits,
                params.scale_factor,
                params.min_neighbors as i32,
                0,
                Size::new(params.min_size.0 as i32, params.min_size.1 as i32),
                Size::new(0, 0),
            )
            .map_err(|e| DetectorError::Backend(e.to_string()))?;

        // ROI-relative hits back to full-image coordinates.
        Ok(hits
            .iter()
            .map(|r| BoundingBox::new(search.x + r.x, search.y + r.y, r.width, r.height))
            .collect())
    }
}
