use crate::shared::bounding_box::BoundingBox;

/// A face that passed screening: bounding box, centroid, and the time it was
/// observed. The centroid is what the liveness tracker compares between
/// consecutive frames.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedFace {
    pub bounds: BoundingBox,
    pub center: (i32, i32),
    pub timestamp_ms: u64,
}

impl DetectedFace {
    pub fn new(bounds: BoundingBox, timestamp_ms: u64) -> Self {
        Self {
            bounds,
            center: bounds.center(),
            timestamp_ms,
        }
    }

    /// Centroid distance to another detection.
    pub fn distance_to(&self, other: &DetectedFace) -> f64 {
        self.bounds.center_distance(&other.bounds)
    }
}
