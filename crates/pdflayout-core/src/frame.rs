//! Page coordinate normalization for rotated pages.
//!
//! Providers report geometry in the page's intrinsic (rotated) space. A
//! [`PageFrame`] maps it into a single unrotated frame with a bottom-left
//! origin, whatever the page's `/Rotate` value. Every geometry object is
//! normalized exactly once, when it is first read from the provider.

use crate::error::LayoutError;
use crate::geometry::{Point, Rectangle};

/// Page dimensions and rotation, with the transform into the unrotated frame.
///
/// `width` and `height` are the provider-reported page size, which already
/// accounts for the rotation (a 90° letter page is 792 wide and 612 high).
///
/// # Coordinate Transform
///
/// | rotation | `(x, y)` maps to     |
/// |----------|----------------------|
/// | 0        | `(x, y)`             |
/// | 90       | `(y, height - x)`    |
/// | 180      | `(width - x, height - y)` |
/// | 270      | `(width - y, x)`     |
///
/// # Example
///
/// ```
/// use pdflayout_core::{PageFrame, Rectangle};
///
/// let frame = PageFrame::new(792.0, 612.0, 90).unwrap();
/// let bbox = frame.normalize_rect(&Rectangle::new(72.0, 717.0, 80.0, 729.0));
/// assert_eq!(bbox, Rectangle::new(717.0, 532.0, 729.0, 540.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageFrame {
    width: f64,
    height: f64,
    rotation: i32,
}

impl PageFrame {
    /// Create a frame from the provider-reported page size and rotation.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidRotation`] if `rotation` is not a
    /// multiple of 90 degrees.
    pub fn new(width: f64, height: f64, rotation: i32) -> Result<Self, LayoutError> {
        if rotation % 90 != 0 {
            return Err(LayoutError::InvalidRotation(rotation));
        }
        Ok(Self {
            width,
            height,
            rotation: rotation.rem_euclid(360),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Intrinsic page rotation in degrees (0, 90, 180, or 270).
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// The page area in normalized coordinates.
    pub fn bbox(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.width, self.height)
    }

    /// Map a provider-space point into the unrotated frame.
    pub fn normalize_point(&self, p: Point) -> Point {
        match self.rotation {
            90 => Point::new(p.y, self.height - p.x),
            180 => Point::new(self.width - p.x, self.height - p.y),
            270 => Point::new(self.width - p.y, p.x),
            _ => p,
        }
    }

    /// Map a normalized point back into provider space.
    pub fn denormalize_point(&self, p: Point) -> Point {
        match self.rotation {
            90 => Point::new(self.height - p.y, p.x),
            180 => Point::new(self.width - p.x, self.height - p.y),
            270 => Point::new(p.y, self.width - p.x),
            _ => p,
        }
    }

    /// Map a provider-space box into the unrotated frame.
    ///
    /// For a 90° page this is `(p0, p1) -> (p0.y, H - p1.x, p1.y, H - p0.x)`.
    pub fn normalize_rect(&self, r: &Rectangle) -> Rectangle {
        Rectangle::from_corners(self.normalize_point(r.p0), self.normalize_point(r.p1))
    }

    /// Map a normalized box back into provider space.
    pub fn denormalize_rect(&self, r: &Rectangle) -> Rectangle {
        Rectangle::from_corners(self.denormalize_point(r.p0), self.denormalize_point(r.p1))
    }
}
