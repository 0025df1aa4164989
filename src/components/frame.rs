//! Pixel rectangles addressing regions of a sprite sheet.

/// Axis-aligned pixel rectangle selecting one pose inside a sprite sheet.
///
/// Corners are `(x0, y0)` inclusive and `(x1, y1)` exclusive. A manifest may
/// list corners in any order; [`Frame::new`] swaps them so `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Frame {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Build from a manifest entry `[x0, y0, x1, y1]`.
    pub fn from_corners(c: [i32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Rectangle covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> u32 {
        (self.x1 - self.x0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Intersection with `bounds`.
    ///
    /// A rectangle that does not overlap `bounds` collapses to an empty frame
    /// anchored at `bounds`' top-left corner.
    pub fn intersect(&self, bounds: &Frame) -> Frame {
        let x0 = self.x0.max(bounds.x0);
        let y0 = self.y0.max(bounds.y0);
        let x1 = self.x1.min(bounds.x1);
        let y1 = self.y1.min(bounds.y1);
        if x0 >= x1 || y0 >= y1 {
            return Frame {
                x0: bounds.x0,
                y0: bounds.y0,
                x1: bounds.x0,
                y1: bounds.y0,
            };
        }
        Frame { x0, y0, x1, y1 }
    }

    /// Translate a frame expressed relative to `self` into `self`'s parent space.
    pub fn offset_by(&self, parent: &Frame) -> Frame {
        Frame {
            x0: self.x0 + parent.x0,
            y0: self.y0 + parent.y0,
            x1: self.x1 + parent.x0,
            y1: self.y1 + parent.y0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_swaps_reversed_corners() {
        let f = Frame::new(32, 16, 0, 0);
        assert_eq!(f, Frame { x0: 0, y0: 0, x1: 32, y1: 16 });
        assert_eq!(f.width(), 32);
        assert_eq!(f.height(), 16);
    }

    #[test]
    fn test_intersect_clips_to_bounds() {
        let sheet = Frame::full(64, 32);
        let f = Frame::new(48, 16, 80, 48).intersect(&sheet);
        assert_eq!(f, Frame::new(48, 16, 64, 32));
    }

    #[test]
    fn test_intersect_outside_is_empty() {
        let sheet = Frame::full(64, 32);
        let f = Frame::new(100, 100, 120, 120).intersect(&sheet);
        assert!(f.is_empty());
        assert_eq!(f.width(), 0);
        assert_eq!(f.height(), 0);
    }

    #[test]
    fn test_offset_by_parent() {
        let parent = Frame::new(10, 20, 50, 60);
        let child = Frame::new(1, 2, 5, 6).offset_by(&parent);
        assert_eq!(child, Frame::new(11, 22, 15, 26));
    }
}
