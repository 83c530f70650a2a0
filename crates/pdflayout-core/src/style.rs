//! Styling enums reported by the primitive provider as raw integer codes.

use crate::error::LayoutError;

/// Classification of a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    Line,
    Bezier,
    Move,
}

impl SegmentKind {
    /// Decode the provider's segment type code (0 = line, 1 = bezier, 2 = move).
    pub fn from_code(code: i32) -> Result<Self, LayoutError> {
        match code {
            0 => Ok(SegmentKind::Line),
            1 => Ok(SegmentKind::Bezier),
            2 => Ok(SegmentKind::Move),
            _ => Err(LayoutError::InvalidStyleCode {
                kind: "segment",
                code,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::Line => "LINE",
            SegmentKind::Bezier => "BEZIER",
            SegmentKind::Move => "MOVE",
        }
    }
}

/// Stroke cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    ProjectingSquare,
}

impl LineCap {
    pub fn from_code(code: i32) -> Result<Self, LayoutError> {
        match code {
            0 => Ok(LineCap::Butt),
            1 => Ok(LineCap::Round),
            2 => Ok(LineCap::ProjectingSquare),
            _ => Err(LayoutError::InvalidStyleCode { kind: "cap", code }),
        }
    }
}

/// Stroke join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn from_code(code: i32) -> Result<Self, LayoutError> {
        match code {
            0 => Ok(LineJoin::Miter),
            1 => Ok(LineJoin::Round),
            2 => Ok(LineJoin::Bevel),
            _ => Err(LayoutError::InvalidStyleCode { kind: "join", code }),
        }
    }
}

/// Text render mode (PDF `Tr` operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    #[default]
    Unknown,
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
}

impl RenderMode {
    /// Decode the provider's render mode code.
    ///
    /// Codes outside `0..=7` (the provider reports `-1` when it cannot tell)
    /// map to [`RenderMode::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => RenderMode::Fill,
            1 => RenderMode::Stroke,
            2 => RenderMode::FillStroke,
            3 => RenderMode::Invisible,
            4 => RenderMode::FillClip,
            5 => RenderMode::StrokeClip,
            6 => RenderMode::FillStrokeClip,
            7 => RenderMode::Clip,
            _ => RenderMode::Unknown,
        }
    }

    pub fn is_invisible(&self) -> bool {
        matches!(self, RenderMode::Invisible | RenderMode::Clip)
    }
}
