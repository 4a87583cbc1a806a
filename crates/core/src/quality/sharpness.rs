//! Focus scoring via first-derivative edge response.
//!
//! A sharp face region has strong local intensity gradients; defocus and
//! motion blur flatten them. The score is the mean per-pixel magnitude of
//! the horizontal and vertical Sobel responses over the region.

use ndarray::Array2;

use crate::shared::bounding_box::BoundingBox;

/// 3×3 Sobel kernels, horizontal and vertical first derivatives.
const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Mean gradient magnitude over `region` of a grayscale plane.
///
/// Out-of-image rows/columns are replicated at the borders. A region that
/// clamps to nothing scores 0.0 (and will always read as not sharp).
pub fn mean_gradient_magnitude(gray: &Array2<u8>, region: BoundingBox) -> f64 {
    let (rows, cols) = gray.dim();
    let roi = region.clamped_to(cols as u32, rows as u32);
    if roi.is_empty() {
        return 0.0;
    }

    let mut total = 0.0f64;
    for y in roi.y..roi.y + roi.height {
        for x in roi.x..roi.x + roi.width {
            let mut gx = 0.0f64;
            let mut gy = 0.0f64;
            for ky in 0..3usize {
                for kx in 0..3usize {
                    let sy = (y + ky as i32 - 1).clamp(0, rows as i32 - 1) as usize;
                    let sx = (x + kx as i32 - 1).clamp(0, cols as i32 - 1) as usize;
                    let v = gray[[sy, sx]] as f64;
                    gx += v * SOBEL_X[ky][kx];
                    gy += v * SOBEL_Y[ky][kx];
                }
            }
            total += (gx * gx + gy * gy).sqrt();
        }
    }

    total / (roi.width as f64 * roi.height as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plane(rows: usize, cols: usize, f: impl Fn(usize, usize) -> u8) -> Array2<u8> {
        Array2::from_shape_fn((rows, cols), |(y, x)| f(y, x))
    }

    fn full(gray: &Array2<u8>) -> BoundingBox {
        BoundingBox::full_image(gray.dim().1 as u32, gray.dim().0 as u32)
    }

    #[test]
    fn test_uniform_plane_scores_zero() {
        let gray = plane(20, 20, |_, _| 128);
        let region = full(&gray);
        assert_relative_eq!(mean_gradient_magnitude(&gray, region), 0.0);
    }

    #[test]
    fn test_stripes_score_above_threshold() {
        // Two-pixel vertical stripes put a full-contrast transition next to
        // every pixel, far above the 22.0 gate.
        let gray = plane(20, 20, |_, x| if x % 4 < 2 { 255 } else { 0 });
        let region = full(&gray);
        let score = mean_gradient_magnitude(&gray, region);
        assert!(score > 100.0, "stripe score was {score}");
    }

    #[test]
    fn test_higher_contrast_scores_higher() {
        // Same pattern at lower contrast must score lower: blur reduces
        // local contrast, and the score must track it.
        let strong = plane(16, 16, |_, x| if x % 4 < 2 { 255 } else { 0 });
        let weak = plane(16, 16, |_, x| if x % 4 < 2 { 140 } else { 100 });
        let region = full(&strong);
        assert!(
            mean_gradient_magnitude(&strong, region)
                > 4.0 * mean_gradient_magnitude(&weak, region)
        );
    }

    #[test]
    fn test_vertical_edge_known_response() {
        // Single vertical step 0→255 between columns 7 and 8 on a wide
        // plane: interior pixels adjacent to the step see |gx| = 4*255,
        // everything else 0. Two such columns out of 16.
        let gray = plane(16, 16, |_, x| if x < 8 { 0 } else { 255 });
        let region = full(&gray);
        let score = mean_gradient_magnitude(&gray, region);
        assert_relative_eq!(score, (4.0 * 255.0 * 2.0) / 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_region_restricts_scoring() {
        // Edge lives only in the right half; scoring the flat left half
        // must not see it.
        let gray = plane(16, 16, |_, x| if x < 12 { 0 } else { 255 });
        let left = BoundingBox::new(0, 0, 8, 16);
        assert_relative_eq!(mean_gradient_magnitude(&gray, left), 0.0);
    }

    #[test]
    fn test_region_outside_image_scores_zero() {
        let gray = plane(10, 10, |_, _| 200);
        let outside = BoundingBox::new(50, 50, 20, 20);
        assert_relative_eq!(mean_gradient_magnitude(&gray, outside), 0.0);
    }

    #[test]
    fn test_region_overhanging_image_is_clamped() {
        let gray = plane(10, 10, |y, x| if (x + y) % 2 == 0 { 255 } else { 0 });
        let overhang = BoundingBox::new(5, 5, 20, 20);
        let clamped = BoundingBox::new(5, 5, 5, 5);
        assert_relative_eq!(
            mean_gradient_magnitude(&gray, overhang),
            mean_gradient_magnitude(&gray, clamped)
        );
    }
}
