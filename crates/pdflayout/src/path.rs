//! Vector path model.

use std::cell::OnceCell;
use std::fmt;

use pdflayout_core::{
    LayoutError, Line, LineCap, LineJoin, PageFrame, Point, Rectangle, Rgba, SegmentKind,
    Transform,
};
use pdflayout_provider::PrimitiveProvider;

use crate::util::{Lift, try_init};

/// A path point with the type of the segment that ends at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub point: Point,
    pub kind: SegmentKind,
}

impl PathPoint {
    pub fn new(point: Point, kind: SegmentKind) -> Self {
        Self { point, kind }
    }
}

impl fmt::Display for PathPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            SegmentKind::Line => 'L',
            SegmentKind::Bezier => 'B',
            SegmentKind::Move => 'M',
        };
        write!(f, "{tag}({:.1}, {:.1})", self.point.x, self.point.y)
    }
}

/// A vector path on a page.
///
/// The bounding box is read when the page's objects are loaded; segments
/// and styling are fetched on first access.
pub struct Path<P: PrimitiveProvider> {
    object: P::Object,
    index: usize,
    frame: PageFrame,
    bbox: Rectangle,
    count: OnceCell<usize>,
    matrix: OnceCell<Transform>,
    points: OnceCell<Vec<PathPoint>>,
    lines: OnceCell<Vec<Line>>,
    fill: OnceCell<Rgba>,
    stroke: OnceCell<Rgba>,
    width: OnceCell<f64>,
    cap: OnceCell<LineCap>,
    join: OnceCell<LineJoin>,
}

impl<P: PrimitiveProvider> Path<P> {
    pub(crate) fn load(object: P::Object, index: usize, frame: PageFrame) -> Result<Self, LayoutError> {
        let bbox = frame.normalize_rect(&P::object_bounds(&object).lift()?);
        Ok(Self {
            object,
            index,
            frame,
            bbox,
            count: OnceCell::new(),
            matrix: OnceCell::new(),
            points: OnceCell::new(),
            lines: OnceCell::new(),
            fill: OnceCell::new(),
            stroke: OnceCell::new(),
            width: OnceCell::new(),
            cap: OnceCell::new(),
            join: OnceCell::new(),
        })
    }

    /// Index of the path in the page's object list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bbox(&self) -> Rectangle {
        self.bbox
    }

    /// Number of segments reported by the provider.
    pub fn count(&self) -> Result<usize, LayoutError> {
        try_init(&self.count, || Ok(P::path_segments(&self.object).lift()?.len())).copied()
    }

    /// Local-to-page transform, in provider space.
    pub fn matrix(&self) -> Result<Transform, LayoutError> {
        try_init(&self.matrix, || P::object_matrix(&self.object).lift()).copied()
    }

    /// Points in page coordinates.
    ///
    /// The first point is always a MOVE. Every closed subpath gets an extra
    /// LINE point back to the subpath's starting point.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPath`] if the first segment is not a
    /// MOVE, and [`LayoutError::InvalidStyleCode`] for an unknown segment type.
    pub fn points(&self) -> Result<&[PathPoint], LayoutError> {
        try_init(&self.points, || {
            let matrix = self.matrix()?;
            let segments = P::path_segments(&self.object).lift()?;
            let mut points = Vec::with_capacity(segments.len() + 1);
            let mut start = None;
            for (i, segment) in segments.iter().enumerate() {
                let kind = SegmentKind::from_code(segment.kind)?;
                if i == 0 && kind != SegmentKind::Move {
                    return Err(LayoutError::InvalidPath {
                        index: self.index,
                        reason: format!("first segment is {} instead of MOVE", kind.name()),
                    });
                }
                let point = self
                    .frame
                    .normalize_point(matrix.transform_point(segment.point));
                if kind == SegmentKind::Move {
                    start = Some(point);
                }
                points.push(PathPoint::new(point, kind));
                if segment.close {
                    if let Some(start) = start {
                        points.push(PathPoint::new(start, SegmentKind::Line));
                    }
                }
            }
            Ok(points)
        })
        .map(Vec::as_slice)
    }

    /// Segments between consecutive points, typed by their end point.
    pub fn lines(&self) -> Result<&[Line], LayoutError> {
        try_init(&self.lines, || {
            let width = self.width()?;
            Ok(self
                .points()?
                .windows(2)
                .map(|pair| Line::new(pair[0].point, pair[1].point, pair[1].kind, width))
                .collect())
        })
        .map(Vec::as_slice)
    }

    pub fn fill(&self) -> Result<Rgba, LayoutError> {
        try_init(&self.fill, || P::path_fill_color(&self.object).lift()).copied()
    }

    pub fn stroke(&self) -> Result<Rgba, LayoutError> {
        try_init(&self.stroke, || P::path_stroke_color(&self.object).lift()).copied()
    }

    /// Stroke width.
    pub fn width(&self) -> Result<f64, LayoutError> {
        try_init(&self.width, || P::path_stroke_width(&self.object).lift()).copied()
    }

    pub fn cap(&self) -> Result<LineCap, LayoutError> {
        try_init(&self.cap, || {
            LineCap::from_code(P::path_line_cap(&self.object).lift()?)
        })
        .copied()
    }

    pub fn join(&self) -> Result<LineJoin, LayoutError> {
        try_init(&self.join, || {
            LineJoin::from_code(P::path_line_join(&self.object).lift()?)
        })
        .copied()
    }

    /// Compact dump of all points, e.g. `P4M(0.0, 0.0),L(10.0, 0.0),...`.
    pub fn describe(&self) -> Result<String, LayoutError> {
        let points: Vec<String> = self.points()?.iter().map(ToString::to_string).collect();
        Ok(format!("P{}{}", self.count()?, points.join(",")))
    }
}

impl<P: PrimitiveProvider> fmt::Debug for Path<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("index", &self.index)
            .field("bbox", &self.bbox)
            .finish()
    }
}
