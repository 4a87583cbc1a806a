//! Turns raw camera frames into normalized evaluable images: decode,
//! sensor-to-display rotation, front-camera mirror, bounded downscale.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::shared::config::GateConfig;
use crate::shared::frame::{Frame, RawFrame};

/// Normalizes one camera frame.
///
/// Returns `None` when the buffer does not decode — dropped frames are
/// expected under load and must not surface as pipeline errors. Each
/// transform consumes its input; no intermediate buffer is retained.
pub fn normalize_camera_frame(raw: RawFrame, config: &GateConfig) -> Option<Frame> {
    let decoded = match image::load_from_memory(&raw.data) {
        Ok(img) => img.into_rgb8(),
        Err(e) => {
            log::debug!("dropping undecodable frame: {e}");
            return None;
        }
    };
    if decoded.width() != raw.width || decoded.height() != raw.height {
        log::debug!(
            "frame reported {}x{} but decoded {}x{}",
            raw.width,
            raw.height,
            decoded.width(),
            decoded.height()
        );
    }

    let oriented = orient(decoded, raw.rotation_degrees, raw.mirrored);
    let bounded = bound_dimensions(oriented, config.max_photo_width, config.max_photo_height);
    let (w, h) = (bounded.width(), bounded.height());
    Some(Frame::new(bounded.into_raw(), w, h, raw.timestamp_ms))
}

/// Applies the rotation quadrant, then the horizontal mirror.
///
/// Sensor-to-display corrections are right angles; arbitrary degrees are
/// quantized to the nearest quadrant.
fn orient(img: RgbImage, rotation_degrees: f32, mirrored: bool) -> RgbImage {
    let rotated = match rotation_quadrant(rotation_degrees) {
        90 => imageops::rotate90(&img),
        180 => imageops::rotate180(&img),
        270 => imageops::rotate270(&img),
        _ => img,
    };
    if mirrored {
        imageops::flip_horizontal(&rotated)
    } else {
        rotated
    }
}

/// Nearest quadrant in `{0, 90, 180, 270}` for a rotation in degrees.
fn rotation_quadrant(degrees: f32) -> u32 {
    let normalized = degrees.rem_euclid(360.0);
    (((normalized / 90.0).round() as u32) % 4) * 90
}

/// Uniform aspect-preserving downscale so both dimensions fit the photo
/// bound; images already within the bound pass through untouched.
fn bound_dimensions(img: RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (w, h) = (img.width(), img.height());
    if w <= max_width && h <= max_height {
        return img;
    }
    let scale = (max_width as f64 / w as f64).min(max_height as f64 / h as f64);
    let new_w = ((w as f64 * scale).round() as u32).max(1);
    let new_h = ((h as f64 * scale).round() as u32).max(1);
    imageops::resize(&img, new_w, new_h, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn raw_frame(img: &RgbImage, rotation: f32, mirrored: bool) -> RawFrame {
        RawFrame {
            data: encode_png(img),
            width: img.width(),
            height: img.height(),
            rotation_degrees: rotation,
            mirrored,
            timestamp_ms: 42,
        }
    }

    fn solid(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, image::Rgb([90, 90, 90]))
    }

    #[rstest]
    #[case::downscale_both_axes(1920, 1600, 960, 800)]
    #[case::bound_by_width(1200, 800, 960, 640)]
    #[case::bound_by_height(960, 1000, 768, 800)]
    #[case::already_small(640, 480, 640, 480)]
    #[case::exactly_at_bound(960, 800, 960, 800)]
    fn test_downscale_dimensions(
        #[case] w: u32,
        #[case] h: u32,
        #[case] expect_w: u32,
        #[case] expect_h: u32,
    ) {
        let frame =
            normalize_camera_frame(raw_frame(&solid(w, h), 0.0, false), &GateConfig::default())
                .unwrap();
        assert_eq!((frame.width(), frame.height()), (expect_w, expect_h));
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let frame =
            normalize_camera_frame(raw_frame(&solid(640, 480), 90.0, false), &GateConfig::default())
                .unwrap();
        assert_eq!((frame.width(), frame.height()), (480, 640));
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(90.0, 90)]
    #[case(269.0, 270)]
    #[case(359.0, 0)]
    #[case(-90.0, 270)]
    #[case(450.0, 90)]
    fn test_rotation_quadrant(#[case] degrees: f32, #[case] expected: u32) {
        assert_eq!(rotation_quadrant(degrees), expected);
    }

    #[test]
    fn test_mirror_flips_pixels() {
        // Left column red, right column blue; mirrored output swaps them.
        let mut img = RgbImage::from_pixel(2, 1, image::Rgb([0, 0, 255]));
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));

        let frame =
            normalize_camera_frame(raw_frame(&img, 0.0, true), &GateConfig::default()).unwrap();
        assert_eq!(&frame.data()[0..3], &[0, 0, 255]);
        assert_eq!(&frame.data()[3..6], &[255, 0, 0]);
    }

    #[test]
    fn test_rotation_applied_before_mirror() {
        // 1x2 column, top red / bottom blue. Rotate 90° clockwise puts red
        // on the right; mirroring then moves it back to the left. Applying
        // the mirror first would leave red on the right.
        let mut img = RgbImage::from_pixel(1, 2, image::Rgb([0, 0, 255]));
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));

        let frame =
            normalize_camera_frame(raw_frame(&img, 90.0, true), &GateConfig::default()).unwrap();
        assert_eq!((frame.width(), frame.height()), (2, 1));
        assert_eq!(&frame.data()[0..3], &[255, 0, 0]);
    }

    #[test]
    fn test_undecodable_frame_is_dropped() {
        let raw = RawFrame {
            data: vec![0xde, 0xad, 0xbe, 0xef],
            width: 2,
            height: 2,
            rotation_degrees: 0.0,
            mirrored: false,
            timestamp_ms: 0,
        };
        assert!(normalize_camera_frame(raw, &GateConfig::default()).is_none());
    }

    #[test]
    fn test_timestamp_carried_through() {
        let frame =
            normalize_camera_frame(raw_frame(&solid(10, 10), 0.0, false), &GateConfig::default())
                .unwrap();
        assert_eq!(frame.timestamp_ms(), 42);
    }

    #[test]
    fn test_tunable_photo_bound() {
        let config = GateConfig {
            max_photo_width: 100,
            max_photo_height: 100,
            ..GateConfig::default()
        };
        let frame = normalize_camera_frame(raw_frame(&solid(400, 200), 0.0, false), &config)
            .unwrap();
        assert_eq!((frame.width(), frame.height()), (100, 50));
    }
}
