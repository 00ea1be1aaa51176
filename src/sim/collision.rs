//! Axis-aligned collision detection
//!
//! Every entity hit-test in the game reduces to one AABB overlap check.
//! Rotation is cosmetic only (collectibles spin, planes bank) - hit-testing
//! always uses the un-rotated bounding box.

/// An axis-aligned rectangle in viewport pixel coordinates.
///
/// `x`/`y` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True iff the two rectangles overlap with non-zero area.
    ///
    /// Half-open interval semantics: rectangles that merely share an edge
    /// do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Center point, for explosion placement.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
