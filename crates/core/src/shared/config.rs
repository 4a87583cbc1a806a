use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants;

/// Tunable thresholds for the capture gate.
///
/// One value is threaded through a whole session; the defaults come from
/// [`crate::shared::constants`].
#[derive(Clone, Debug)]
pub struct GateConfig {
    pub min_face_width: u32,
    pub min_face_height: u32,
    pub max_face_width: u32,
    pub max_face_height: u32,
    pub max_photo_width: u32,
    pub max_photo_height: u32,
    /// Sharpness scores at or below this are rejected as blurred.
    pub sharpness_threshold: f64,
    /// Encoded-size cap applied to accepted still photos.
    pub photo_byte_limit: usize,
    /// Center movement at or below this between consecutive accepted frames
    /// is rejected as a static subject.
    pub min_center_distance: f64,
    /// Consecutive valid frames required for streamed acceptance.
    pub required_streak: u32,
    /// Caller-facing progress scale; progress = streak × unit / required.
    pub progress_unit: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_face_width: constants::MIN_FACE_WIDTH,
            min_face_height: constants::MIN_FACE_HEIGHT,
            max_face_width: constants::MAX_FACE_WIDTH,
            max_face_height: constants::MAX_FACE_HEIGHT,
            max_photo_width: constants::MAX_PHOTO_WIDTH,
            max_photo_height: constants::MAX_PHOTO_HEIGHT,
            sharpness_threshold: constants::SHARPNESS_THRESHOLD,
            photo_byte_limit: constants::PHOTO_BYTE_LIMIT,
            min_center_distance: constants::MIN_CENTER_DISTANCE,
            required_streak: constants::REQUIRED_STREAK,
            progress_unit: constants::PROGRESS_UNIT,
        }
    }
}

impl GateConfig {
    /// Absolute size-bounds admission test, each axis checked independently.
    pub fn face_in_bounds(&self, bounds: &BoundingBox) -> bool {
        let w = bounds.width;
        let h = bounds.height;
        w >= self.min_face_width as i32
            && w <= self.max_face_width as i32
            && h >= self.min_face_height as i32
            && h <= self.max_face_height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::at_minimum(100, 100, true)]
    #[case::at_maximum(800, 800, true)]
    #[case::typical(320, 400, true)]
    #[case::below_min_width(99, 200, false)]
    #[case::below_min_height(200, 99, false)]
    #[case::above_max_width(801, 200, false)]
    #[case::above_max_height(200, 801, false)]
    #[case::small_square(50, 50, false)]
    fn test_face_in_bounds(#[case] w: i32, #[case] h: i32, #[case] expected: bool) {
        let config = GateConfig::default();
        let bounds = BoundingBox::new(0, 0, w, h);
        assert_eq!(config.face_in_bounds(&bounds), expected);
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = GateConfig::default();
        assert_eq!(config.max_photo_width, 960);
        assert_eq!(config.max_photo_height, 800);
        assert_eq!(config.required_streak, 3);
        assert_eq!(config.progress_unit, 360);
        assert_eq!(config.photo_byte_limit, 1024 * 1024);
    }
}
