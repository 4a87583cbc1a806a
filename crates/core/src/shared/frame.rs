use std::time::{SystemTime, UNIX_EPOCH};

use ndarray::Array2;

/// Milliseconds since the Unix epoch; stamps frames and artifact names.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A raw camera frame as handed over by the capture layer: an encoded pixel
/// buffer plus the sensor-to-display correction that still has to be applied.
///
/// Owned by exactly one pipeline stage at a time; submitting a frame moves it
/// into the session.
#[derive(Clone, Debug)]
pub struct RawFrame {
    /// Encoded image bytes (whatever container the camera produces).
    pub data: Vec<u8>,
    /// Source dimensions as reported by the capture layer. The decoded
    /// dimensions are authoritative; a mismatch is logged and tolerated.
    pub width: u32,
    pub height: u32,
    /// Clockwise sensor-to-display rotation in degrees.
    pub rotation_degrees: f32,
    /// Set for the front camera; applies a horizontal mirror.
    pub mirrored: bool,
    /// Arrival time, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// A normalized evaluable image: contiguous RGB8 bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; inside the pipeline the
/// pixel data moves from stage to stage without aliasing.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    timestamp_ms: u64,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ms: u64) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            timestamp_ms,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Grayscale plane as `(height, width)`; computed once per evaluation.
    pub fn to_luma(&self) -> Array2<u8> {
        let rgb = image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .expect("Frame data length must match dimensions");
        let gray = image::DynamicImage::ImageRgb8(rgb).into_luma8();
        Array2::from_shape_vec(
            (self.height as usize, self.width as usize),
            gray.into_raw(),
        )
        .expect("luma plane length must match dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2 RGB
        let frame = Frame::new(data.clone(), 2, 2, 1234);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.timestamp_ms(), 1234);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 3")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 0);
    }

    #[test]
    fn test_to_luma_shape() {
        let frame = Frame::new(vec![0u8; 4 * 2 * 3], 4, 2, 0);
        let gray = frame.to_luma();
        assert_eq!(gray.shape(), &[2, 4]); // (height, width)
    }

    #[test]
    fn test_to_luma_extremes() {
        // One white pixel, one black pixel
        let data = vec![255, 255, 255, 0, 0, 0];
        let frame = Frame::new(data, 2, 1, 0);
        let gray = frame.to_luma();
        assert_eq!(gray[[0, 0]], 255);
        assert_eq!(gray[[0, 1]], 0);
    }

    #[test]
    fn test_to_luma_does_not_consume_frame() {
        let frame = Frame::new(vec![128u8; 2 * 2 * 3], 2, 2, 0);
        let _ = frame.to_luma();
        assert_eq!(frame.data().len(), 12);
    }

    #[test]
    fn test_now_millis_monotone_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
        assert!(a > 1_600_000_000_000); // after Sep 2020, sanity only
    }
}
