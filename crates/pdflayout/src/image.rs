//! Raster image model.

use std::cell::OnceCell;
use std::fmt;

use pdflayout_core::{LayoutError, Line, PageFrame, Point, Rectangle, Rgba, SegmentKind, Transform};
use pdflayout_provider::PrimitiveProvider;

use crate::util::{Lift, try_init};

/// A raster image on a page.
///
/// Images take part in clustering like paths. They have no real stroke or
/// fill, so they present as a four-sided outline of their bounding box.
pub struct Image<P: PrimitiveProvider> {
    object: P::Object,
    index: usize,
    bbox: Rectangle,
    matrix: OnceCell<Transform>,
}

impl<P: PrimitiveProvider> Image<P> {
    pub(crate) fn load(object: P::Object, index: usize, frame: PageFrame) -> Result<Self, LayoutError> {
        let bbox = frame.normalize_rect(&P::object_bounds(&object).lift()?);
        Ok(Self {
            object,
            index,
            bbox,
            matrix: OnceCell::new(),
        })
    }

    /// Index of the image in the page's object list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bbox(&self) -> Rectangle {
        self.bbox
    }

    /// Image placement matrix, in provider space.
    pub fn matrix(&self) -> Result<Transform, LayoutError> {
        try_init(&self.matrix, || P::object_matrix(&self.object).lift()).copied()
    }

    /// Always 4, one per outline side.
    pub fn count(&self) -> usize {
        4
    }

    pub fn stroke(&self) -> Rgba {
        Rgba::NONE
    }

    pub fn fill(&self) -> Rgba {
        Rgba::NONE
    }

    pub fn width(&self) -> f64 {
        0.0
    }

    /// The bounding box corners, counter-clockwise from the bottom-left.
    ///
    /// The box is already normalized, so the corners are not mapped again.
    pub fn points(&self) -> [Point; 4] {
        self.bbox.points()
    }

    /// The outline: four zero-width lines through the corners, closing back
    /// to the first.
    pub fn lines(&self) -> [Line; 4] {
        let [a, b, c, d] = self.points();
        [
            Line::new(a, b, SegmentKind::Line, 0.0),
            Line::new(b, c, SegmentKind::Line, 0.0),
            Line::new(c, d, SegmentKind::Line, 0.0),
            Line::new(d, a, SegmentKind::Line, 0.0),
        ]
    }
}

impl<P: PrimitiveProvider> fmt::Debug for Image<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("index", &self.index)
            .field("bbox", &self.bbox)
            .finish()
    }
}
