//! Geometry value types: points, rectangles, line segments, and affine transforms.
//!
//! All types use a bottom-left origin with y increasing upward, which is the
//! coordinate system every page-relative geometry is normalized into.

use std::ops::{Add, Neg, Sub};

use crate::style::SegmentKind;

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate counter-clockwise around the origin.
    ///
    /// Quarter turns are computed exactly by swapping and negating axes, so
    /// four rotations by 90° return the original point bit-for-bit.
    pub fn rotated(self, degrees: i32) -> Point {
        match degrees.rem_euclid(360) {
            0 => self,
            90 => Point::new(-self.y, self.x),
            180 => Point::new(-self.x, -self.y),
            270 => Point::new(self.y, -self.x),
            d => {
                let (sin, cos) = f64::from(d).to_radians().sin_cos();
                Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
            }
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle spanned by a bottom-left `p0` and a top-right `p1`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub p0: Point,
    pub p1: Point,
}

impl Rectangle {
    /// Create a rectangle from two opposite corners given as coordinates.
    ///
    /// Corners are re-ordered so that `p0` is always bottom-left.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Create a rectangle from two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            p0: Point::new(a.x.min(b.x), a.y.min(b.y)),
            p1: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest rectangle enclosing all points, or `None` for an empty input.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (lo, hi) = points.fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some(Self { p0: lo, p1: hi })
    }

    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    pub fn left(&self) -> f64 {
        self.p0.x
    }

    pub fn right(&self) -> f64 {
        self.p1.x
    }

    pub fn bottom(&self) -> f64 {
        self.p0.y
    }

    pub fn top(&self) -> f64 {
        self.p1.y
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2.0, (self.p0.y + self.p1.y) / 2.0)
    }

    /// Horizontal center.
    pub fn x(&self) -> f64 {
        self.midpoint().x
    }

    /// Vertical center.
    pub fn y(&self) -> f64 {
        self.midpoint().y
    }

    /// Corners in counter-clockwise order starting at the bottom-left.
    pub fn points(&self) -> [Point; 4] {
        [
            self.p0,
            Point::new(self.p1.x, self.p0.y),
            self.p1,
            Point::new(self.p0.x, self.p1.y),
        ]
    }

    /// A box with zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn translated(&self, offset: Point) -> Rectangle {
        Rectangle {
            p0: self.p0 + offset,
            p1: self.p1 + offset,
        }
    }

    /// Rotate counter-clockwise around the origin and re-normalize the corners.
    pub fn rotated(&self, degrees: i32) -> Rectangle {
        let corners = self.points().map(|p| p.rotated(degrees));
        // Four corners always produce a box.
        Rectangle::enclosing(corners).unwrap_or(*self)
    }

    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }

    /// Whether `point` lies inside or on the border.
    pub fn contains(&self, point: Point) -> bool {
        self.p0.x <= point.x && point.x <= self.p1.x && self.p0.y <= point.y && point.y <= self.p1.y
    }

    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.p0.x <= other.p1.x
            && other.p0.x <= self.p1.x
            && self.p0.y <= other.p1.y
            && other.p0.y <= self.p1.y
    }
}

/// Anything with a page-relative bounding box.
pub trait Bounded {
    fn bbox(&self) -> Rectangle;
}

impl Bounded for Rectangle {
    fn bbox(&self) -> Rectangle {
        *self
    }
}

impl<T: Bounded + ?Sized> Bounded for &T {
    fn bbox(&self) -> Rectangle {
        (**self).bbox()
    }
}

/// A directed line segment with its path segment classification and stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
    pub kind: SegmentKind,
    pub width: f64,
}

impl Line {
    pub fn new(p0: Point, p1: Point, kind: SegmentKind, width: f64) -> Self {
        Self {
            p0,
            p1,
            kind,
            width,
        }
    }

    pub fn bbox(&self) -> Rectangle {
        Rectangle::from_corners(self.p0, self.p1)
    }

    pub fn length(&self) -> f64 {
        let d = self.p1 - self.p0;
        d.x.hypot(d.y)
    }

    pub fn is_horizontal(&self) -> bool {
        self.p0.y == self.p1.y
    }

    pub fn is_vertical(&self) -> bool {
        self.p0.x == self.p1.x
    }
}

/// Affine transformation matrix `[a b c d e f]`.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`, matching the PDF
/// matrix convention.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 6]> for Transform {
    fn from(m: [f64; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }
}
