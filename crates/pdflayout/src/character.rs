//! Glyph model.

use std::cell::{Cell, OnceCell};
use std::fmt;
use std::rc::Rc;

use pdflayout_core::repair::{CARRIAGE_RETURN, LINE_FEED, SPACE, is_blank};
use pdflayout_core::{
    Bounded, GlyphSignature, LayoutError, PageFrame, Point, Rectangle, RenderMode, Rgba,
};
use pdflayout_provider::{FontInfo, PrimitiveProvider};

use crate::handles::PageHandles;
use crate::util::{Lift, try_init};

const TAB: u32 = 0x09;

/// Invisible formatting characters (Unicode category Cf).
const FORMAT_RANGES: &[(char, char)] = &[
    ('\u{ad}', '\u{ad}'),
    ('\u{600}', '\u{605}'),
    ('\u{61c}', '\u{61c}'),
    ('\u{6dd}', '\u{6dd}'),
    ('\u{70f}', '\u{70f}'),
    ('\u{180e}', '\u{180e}'),
    ('\u{200b}', '\u{200f}'),
    ('\u{202a}', '\u{202e}'),
    ('\u{2060}', '\u{2064}'),
    ('\u{2066}', '\u{206f}'),
    ('\u{feff}', '\u{feff}'),
    ('\u{fff9}', '\u{fffb}'),
    ('\u{e0001}', '\u{e0001}'),
    ('\u{e0020}', '\u{e007f}'),
];

/// Private use areas (Unicode category Co).
const PRIVATE_RANGES: &[(char, char)] = &[
    ('\u{e000}', '\u{f8ff}'),
    ('\u{f0000}', '\u{ffffd}'),
    ('\u{100000}', '\u{10fffd}'),
];

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Code points Unicode reserves as never assigned.
fn is_noncharacter(c: char) -> bool {
    let cp = u32::from(c);
    (0xfdd0..=0xfdef).contains(&cp) || cp & 0xfffe == 0xfffe
}

/// Printability: no control, format, private use, noncharacter, or
/// separator code points except the ASCII space.
fn is_printable(c: char) -> bool {
    c == ' '
        || !(c.is_control()
            || c.is_whitespace()
            || is_noncharacter(c)
            || in_ranges(c, FORMAT_RANGES)
            || in_ranges(c, PRIVATE_RANGES))
}

/// One glyph on a page.
///
/// All geometry is in the page's normalized frame. Identity, rotation, and
/// the loose box are read when the page loads; everything else is fetched
/// from the provider on first access and cached.
pub struct Character<P: PrimitiveProvider> {
    handles: Rc<PageHandles<P>>,
    frame: PageFrame,
    index: usize,
    unicode: u32,
    raw_rotation: i32,
    loose: Rectangle,
    bbox: Rectangle,
    origin: OnceCell<Point>,
    tight: OnceCell<Rectangle>,
    font: OnceCell<FontInfo>,
    size: OnceCell<f64>,
    weight: OnceCell<i32>,
    render_mode: OnceCell<RenderMode>,
    fill: OnceCell<Rgba>,
    stroke: OnceCell<Rgba>,
    pub(crate) objlink: Cell<Option<usize>>,
    pub(crate) weblink: Cell<Option<usize>>,
}

impl<P: PrimitiveProvider> Character<P> {
    pub(crate) fn load(
        handles: &Rc<PageHandles<P>>,
        frame: PageFrame,
        index: usize,
    ) -> Result<Self, LayoutError> {
        let text = handles.text()?;
        let unicode = P::char_unicode(text, index).lift()?;
        let raw_rotation = P::char_angle(text, index).lift()?;
        let loose = frame.normalize_rect(&P::char_loose_box(text, index).lift()?);
        let mut ch = Self {
            handles: Rc::clone(handles),
            frame,
            index,
            unicode,
            raw_rotation,
            loose,
            bbox: loose,
            origin: OnceCell::new(),
            tight: OnceCell::new(),
            font: OnceCell::new(),
            size: OnceCell::new(),
            weight: OnceCell::new(),
            render_mode: OnceCell::new(),
            fill: OnceCell::new(),
            stroke: OnceCell::new(),
            objlink: Cell::new(None),
            weblink: Cell::new(None),
        };
        if loose.is_degenerate() {
            ch.bbox = *ch.tight_bbox()?;
        }
        Ok(ch)
    }

    /// Index of the glyph on its page, in provider order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Unicode code point.
    pub fn unicode(&self) -> u32 {
        self.unicode
    }

    /// The glyph as a printable character, or `None` for control and
    /// other non-printable code points.
    pub fn char(&self) -> Option<char> {
        char::from_u32(self.unicode).filter(|&c| is_printable(c))
    }

    /// The text angle reported by the provider, in whole degrees.
    pub fn raw_rotation(&self) -> i32 {
        self.raw_rotation
    }

    /// Effective rotation combining page and glyph rotation.
    ///
    /// On a 90° page an upright non-blank glyph is treated as vertical text
    /// and reports 90°. Otherwise, when both rotations are non-zero they
    /// add up (mod 360), and when only one is non-zero that one wins.
    pub fn rotation(&self) -> i32 {
        let page = self.frame.rotation();
        if page == 90 && self.raw_rotation == 0 && !is_blank(self.unicode) {
            90
        } else if page != 0 && self.raw_rotation != 0 {
            (page + self.raw_rotation).rem_euclid(360)
        } else if self.raw_rotation == 0 {
            page
        } else {
            self.raw_rotation
        }
    }

    /// Effective box: the (possibly repaired) loose box, or the tight box
    /// when the loose box is degenerate.
    pub fn bbox(&self) -> Rectangle {
        self.bbox
    }

    /// The loose box, after repair.
    pub fn loose_bbox(&self) -> Rectangle {
        self.loose
    }

    pub(crate) fn repair(&mut self, bbox: Rectangle) {
        self.loose = bbox;
        self.bbox = bbox;
    }

    /// Advance along the text direction. Any rotation reads the box
    /// sideways.
    pub fn width(&self) -> f64 {
        if self.rotation() != 0 {
            self.bbox.height()
        } else {
            self.bbox.width()
        }
    }

    /// Extent across the text direction.
    pub fn height(&self) -> f64 {
        if self.rotation() != 0 {
            self.bbox.width()
        } else {
            self.bbox.height()
        }
    }

    pub fn origin(&self) -> Result<Point, LayoutError> {
        try_init(&self.origin, || {
            let origin = P::char_origin(self.handles.text()?, self.index).lift()?;
            Ok(self.frame.normalize_point(origin))
        })
        .copied()
    }

    /// The tight box around the glyph's ink.
    pub fn tight_bbox(&self) -> Result<&Rectangle, LayoutError> {
        try_init(&self.tight, || {
            let tight = P::char_tight_box(self.handles.text()?, self.index).lift()?;
            Ok(self.frame.normalize_rect(&tight))
        })
    }

    pub fn tight_width(&self) -> Result<f64, LayoutError> {
        Ok(self.tight_bbox()?.width())
    }

    pub fn tight_height(&self) -> Result<f64, LayoutError> {
        Ok(self.tight_bbox()?.height())
    }

    fn font_info(&self) -> Result<&FontInfo, LayoutError> {
        try_init(&self.font, || {
            P::char_font(self.handles.text()?, self.index).lift()
        })
    }

    pub fn font(&self) -> Result<&str, LayoutError> {
        Ok(&self.font_info()?.name)
    }

    /// Font descriptor flags.
    pub fn flags(&self) -> Result<u32, LayoutError> {
        Ok(self.font_info()?.flags)
    }

    /// Font size in points.
    pub fn size(&self) -> Result<f64, LayoutError> {
        try_init(&self.size, || {
            P::char_font_size(self.handles.text()?, self.index).lift()
        })
        .copied()
    }

    pub fn weight(&self) -> Result<i32, LayoutError> {
        try_init(&self.weight, || {
            P::char_font_weight(self.handles.text()?, self.index).lift()
        })
        .copied()
    }

    pub fn render_mode(&self) -> Result<RenderMode, LayoutError> {
        try_init(&self.render_mode, || {
            let code = P::char_render_mode(self.handles.text()?, self.index).lift()?;
            Ok(RenderMode::from_code(code))
        })
        .copied()
    }

    pub fn fill(&self) -> Result<Rgba, LayoutError> {
        try_init(&self.fill, || {
            P::char_fill_color(self.handles.text()?, self.index).lift()
        })
        .copied()
    }

    pub fn stroke(&self) -> Result<Rgba, LayoutError> {
        try_init(&self.stroke, || {
            P::char_stroke_color(self.handles.text()?, self.index).lift()
        })
        .copied()
    }

    /// Cache key for the glyph box repair pass.
    pub fn signature(&self) -> Result<GlyphSignature, LayoutError> {
        Ok(GlyphSignature::new(
            self.font()?,
            self.unicode,
            self.tight_bbox()?,
        ))
    }

    /// One-line description with every attribute, for diagnostics.
    pub fn describe(&self) -> Result<String, LayoutError> {
        let glyph = match self.char() {
            Some(c) => c.to_string(),
            None => format!("{:#x}", self.unicode),
        };
        Ok(format!(
            "Chr({glyph}, {}, {}, {}, {:?}, {}, {:#x}, {}, {}, {:?})",
            self.size()?,
            self.weight()?,
            self.rotation(),
            self.render_mode()?,
            self.font()?,
            self.flags()?,
            self.fill()?,
            self.stroke()?,
            self.bbox,
        ))
    }
}

impl<P: PrimitiveProvider> Bounded for Character<P> {
    fn bbox(&self) -> Rectangle {
        self.bbox
    }
}

/// Escaped single-glyph rendering: `\n`, `\r`, `\t`, `␣` for space, and
/// the hex code point for anything else that is not printable.
impl<P: PrimitiveProvider> fmt::Display for Character<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unicode {
            LINE_FEED => f.write_str("\\n"),
            CARRIAGE_RETURN => f.write_str("\\r"),
            TAB => f.write_str("\\t"),
            SPACE => f.write_str("␣"),
            _ => match self.char() {
                Some(c) => write!(f, "{c}"),
                None => write!(f, "{:#x}", self.unicode),
            },
        }
    }
}

impl<P: PrimitiveProvider> fmt::Debug for Character<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("index", &self.index)
            .field("unicode", &self.unicode)
            .field("rotation", &self.rotation())
            .field("bbox", &self.bbox)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_characters() {
        assert!(is_printable('A'));
        assert!(is_printable(' '));
        assert!(is_printable('µ'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\u{7f}'));
        assert!(!is_printable('\u{a0}'));
        assert!(!is_printable('\u{200b}'));
    }

    #[test]
    fn invisible_and_reserved_code_points_are_not_printable() {
        for c in [
            '\u{ad}', '\u{61c}', '\u{180e}', '\u{200e}', '\u{202a}', '\u{202e}', '\u{2060}',
            '\u{2064}', '\u{2066}', '\u{206f}', '\u{feff}',
        ] {
            assert!(!is_printable(c), "format {:#x}", u32::from(c));
        }
        for c in ['\u{e000}', '\u{f8ff}', '\u{f0000}', '\u{10fffd}'] {
            assert!(!is_printable(c), "private {:#x}", u32::from(c));
        }
        for c in ['\u{fdd0}', '\u{fdef}', '\u{fffe}', '\u{ffff}', '\u{1fffe}', '\u{10ffff}'] {
            assert!(!is_printable(c), "noncharacter {:#x}", u32::from(c));
        }
        // Neighbours of the excluded ranges stay printable.
        for c in ['\u{ac}', '\u{ae}', '\u{2070}', '\u{d7fb}', '\u{f900}', '\u{fdcf}', '\u{fffd}'] {
            assert!(is_printable(c), "{:#x}", u32::from(c));
        }
    }
}
