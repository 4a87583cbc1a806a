/// An axis-aligned rectangle in image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A box covering a whole `width` × `height` image.
    pub fn full_image(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Geometric center, integer-truncated like the detector's own output.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn center_distance(&self, other: &BoundingBox) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let dx = (ax - bx) as f64;
        let dy = (ay - by) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The lower half of the box by height.
    ///
    /// Used as the mouth search region for a detected face.
    pub fn lower_half(&self) -> BoundingBox {
        BoundingBox::new(
            self.x,
            self.y + self.height / 2,
            self.width,
            self.height / 2,
        )
    }

    /// Intersects the box with a `width` × `height` image, so region reads
    /// never index outside the pixel buffer.
    pub fn clamped_to(&self, width: u32, height: u32) -> BoundingBox {
        let x1 = self.x.clamp(0, width as i32);
        let y1 = self.y.clamp(0, height as i32);
        let x2 = (self.x + self.width).clamp(0, width as i32);
        let y2 = (self.y + self.height).clamp(0, height as i32);
        BoundingBox::new(x1, y1, (x2 - x1).max(0), (y2 - y1).max(0))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
