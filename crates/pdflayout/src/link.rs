//! Link annotations and detected web links.

use std::fmt;
use std::ops::Range;

use pdflayout_core::Rectangle;

/// A link annotation pointing inside the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjLink {
    /// Position in the page's link list.
    pub index: usize,
    pub bbox: Rectangle,
    /// 0-based destination page, if the destination resolves to one.
    pub dest_page: Option<usize>,
}

impl fmt::Display for ObjLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dest_page {
            Some(page) => write!(f, "Obj({page})"),
            None => f.write_str("Obj(?)"),
        }
    }
}

/// A URL detected in the page text.
#[derive(Debug, Clone, PartialEq)]
pub struct WebLink {
    pub index: usize,
    pub url: String,
    /// Rectangles covering the link text.
    pub bboxes: Vec<Rectangle>,
    /// The glyphs spelling the link, if the provider knows them.
    pub range: Option<Range<usize>>,
}

impl fmt::Display for WebLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Url({})", self.url)
    }
}
