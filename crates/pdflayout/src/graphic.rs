//! A uniform view over paths and images for clustering and filtering.

use pdflayout_core::{Bounded, LayoutError, Line, Point, Rectangle, Rgba};
use pdflayout_provider::PrimitiveProvider;

use crate::{Image, Path};

/// Either a [`Path`] or an [`Image`] of a page.
pub enum Graphic<'a, P: PrimitiveProvider> {
    Path(&'a Path<P>),
    Image(&'a Image<P>),
}

// Derives would require `P: Clone`.
impl<P: PrimitiveProvider> Clone for Graphic<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: PrimitiveProvider> Copy for Graphic<'_, P> {}

impl<'a, P: PrimitiveProvider> Graphic<'a, P> {
    pub fn bbox(&self) -> Rectangle {
        match self {
            Graphic::Path(path) => path.bbox(),
            Graphic::Image(image) => image.bbox(),
        }
    }

    pub fn as_path(&self) -> Option<&'a Path<P>> {
        match *self {
            Graphic::Path(path) => Some(path),
            Graphic::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&'a Image<P>> {
        match *self {
            Graphic::Image(image) => Some(image),
            Graphic::Path(_) => None,
        }
    }

    /// Segment count; 4 for an image.
    pub fn count(&self) -> Result<usize, LayoutError> {
        match self {
            Graphic::Path(path) => path.count(),
            Graphic::Image(image) => Ok(image.count()),
        }
    }

    pub fn fill(&self) -> Result<Rgba, LayoutError> {
        match self {
            Graphic::Path(path) => path.fill(),
            Graphic::Image(image) => Ok(image.fill()),
        }
    }

    pub fn stroke(&self) -> Result<Rgba, LayoutError> {
        match self {
            Graphic::Path(path) => path.stroke(),
            Graphic::Image(image) => Ok(image.stroke()),
        }
    }

    pub fn width(&self) -> Result<f64, LayoutError> {
        match self {
            Graphic::Path(path) => path.width(),
            Graphic::Image(image) => Ok(image.width()),
        }
    }

    pub fn points(&self) -> Result<Vec<Point>, LayoutError> {
        match self {
            Graphic::Path(path) => Ok(path.points()?.iter().map(|p| p.point).collect()),
            Graphic::Image(image) => Ok(image.points().to_vec()),
        }
    }

    pub fn lines(&self) -> Result<Vec<Line>, LayoutError> {
        match self {
            Graphic::Path(path) => Ok(path.lines()?.to_vec()),
            Graphic::Image(image) => Ok(image.lines().to_vec()),
        }
    }
}

impl<P: PrimitiveProvider> Bounded for Graphic<'_, P> {
    fn bbox(&self) -> Rectangle {
        Graphic::bbox(self)
    }
}

impl<P: PrimitiveProvider> std::fmt::Debug for Graphic<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Graphic::Path(path) => std::fmt::Debug::fmt(path, f),
            Graphic::Image(image) => std::fmt::Debug::fmt(image, f),
        }
    }
}
