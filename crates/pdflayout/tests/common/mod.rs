//! Shared builders for the integration tests.

#![allow(dead_code)]

use pdflayout::Document;
use pdflayout_core::{LayoutOptions, Point, Rectangle};
use pdflayout_provider::{MemoryChar, MemoryDocument, MemoryPage, MemoryProvider, ResourceLog};

pub type Doc = Document<MemoryProvider>;

/// Open an in-memory document, returning it with its resource log.
pub fn open(pages: Vec<MemoryPage>) -> (Doc, ResourceLog) {
    open_with(pages, None)
}

pub fn open_with(pages: Vec<MemoryPage>, options: Option<LayoutOptions>) -> (Doc, ResourceLog) {
    let raw = MemoryDocument::new(pages);
    let log = raw.log();
    (Document::new("test", raw, options), log)
}

/// A glyph whose ink sits 2 units above its origin inside a 8x12 loose box.
pub fn glyph(c: char, x: f64, y: f64) -> MemoryChar {
    MemoryChar::new(c, Rectangle::new(x, y, x + 8.0, y + 12.0))
        .with_origin(Point::new(x, y + 2.0))
        .with_tight(Rectangle::new(x, y + 2.0, x + 7.0, y + 11.0))
}

/// Same signature as [`glyph`], but with a collapsed loose box.
pub fn broken_glyph(c: char, x: f64, y: f64) -> MemoryChar {
    MemoryChar::new(c, Rectangle::new(x, y, x, y))
        .with_origin(Point::new(x, y + 2.0))
        .with_tight(Rectangle::new(x, y + 2.0, x + 7.0, y + 11.0))
}

/// One glyph per character of `text`, 10 units apart on a baseline.
pub fn word(text: &str, x: f64, y: f64) -> Vec<MemoryChar> {
    text.chars()
        .enumerate()
        .map(|(i, c)| glyph(c, x + 10.0 * i as f64, y))
        .collect()
}

/// Characters of a page, concatenated.
pub fn text_of<'a, P: pdflayout_provider::PrimitiveProvider + 'a>(
    chars: impl IntoIterator<Item = &'a pdflayout::Character<P>>,
) -> String {
    chars.into_iter().filter_map(|c| c.char()).collect()
}
