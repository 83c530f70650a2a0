//! Degenerate glyph box repair.
//!
//! Some fonts report a zero-width or zero-height loose box for certain
//! glyphs. The same glyph drawn correctly elsewhere in the document has a
//! usable box, so every healthy glyph's loose box is remembered in a
//! canonical frame (origin at the glyph origin, rotation undone) and looked
//! up again for broken instances of the same glyph.

use std::collections::HashMap;
use std::fmt;

use crate::geometry::{Point, Rectangle};

pub const LINE_FEED: u32 = 0x0a;
pub const CARRIAGE_RETURN: u32 = 0x0d;
pub const SPACE: u32 = 0x20;

/// Line feed or carriage return.
pub fn is_line_break(unicode: u32) -> bool {
    unicode == LINE_FEED || unicode == CARRIAGE_RETURN
}

/// Space, line feed, or carriage return.
pub fn is_blank(unicode: u32) -> bool {
    unicode == SPACE || is_line_break(unicode)
}

/// Identity of a glyph for cache lookups.
///
/// Font name, code point, and the tight box height and width rounded to one
/// decimal. Two glyphs with equal signatures are assumed to share a loose box
/// up to translation and rotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphSignature(String);

impl GlyphSignature {
    pub fn new(font: &str, unicode: u32, tight: &Rectangle) -> Self {
        Self(format!(
            "{font} {unicode} {:.1} {:.1}",
            tight.height(),
            tight.width()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlyphSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the repair pass does with one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairAction {
    /// Healthy upright glyph: remember its box.
    Remember,
    /// Degenerate box: look up a replacement.
    Restore,
    /// Neither.
    Skip,
}

impl RepairAction {
    /// Classify a glyph by its code point, raw rotation, and loose box.
    ///
    /// Unrotated blanks with a degenerate box are expected and left alone.
    /// Line breaks are never remembered, and neither is any rotated glyph.
    pub fn classify(unicode: u32, raw_rotation: i32, loose: &Rectangle) -> Self {
        if loose.is_degenerate() {
            if raw_rotation == 0 && is_blank(unicode) {
                RepairAction::Skip
            } else {
                RepairAction::Restore
            }
        } else if raw_rotation == 0 && !is_line_break(unicode) {
            RepairAction::Remember
        } else {
            RepairAction::Skip
        }
    }
}

/// Document-wide cache of canonical glyph boxes.
///
/// The first box remembered for a signature wins. Entries live as long as
/// the document.
#[derive(Debug, Clone, Default)]
pub struct BboxCache {
    entries: HashMap<GlyphSignature, Rectangle>,
}

impl BboxCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The canonical box stored for `signature`, if any.
    pub fn get(&self, signature: &GlyphSignature) -> Option<&Rectangle> {
        self.entries.get(signature)
    }

    /// Bring a page-relative box into the canonical frame.
    pub fn canonical(bbox: &Rectangle, origin: Point, rotation: i32) -> Rectangle {
        bbox.translated(-origin).rotated(rotation)
    }

    /// Store the canonical form of `bbox` unless `signature` is already
    /// known. Returns whether the box was stored.
    pub fn remember(
        &mut self,
        signature: GlyphSignature,
        bbox: &Rectangle,
        origin: Point,
        rotation: i32,
    ) -> bool {
        if self.entries.contains_key(&signature) {
            return false;
        }
        self.entries
            .insert(signature, Self::canonical(bbox, origin, rotation));
        true
    }

    /// Rebuild a page-relative box for a glyph at `origin` drawn with
    /// `rotation`, or `None` on a cache miss.
    pub fn restore(
        &self,
        signature: &GlyphSignature,
        origin: Point,
        rotation: i32,
    ) -> Option<Rectangle> {
        self.entries
            .get(signature)
            .map(|canonical| canonical.rotated(-rotation).translated(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight() -> Rectangle {
        Rectangle::new(0.0, 0.0, 6.04, 7.26)
    }

    #[test]
    fn test_signature_format() {
        let sig = GlyphSignature::new("Helvetica", 65, &tight());
        assert_eq!(sig.as_str(), "Helvetica 65 7.3 6.0");
        assert_eq!(sig.to_string(), "Helvetica 65 7.3 6.0");
    }

    #[test]
    fn test_signature_distinguishes_font_and_size() {
        let a = GlyphSignature::new("Helvetica", 65, &tight());
        let b = GlyphSignature::new("Helvetica-Bold", 65, &tight());
        let c = GlyphSignature::new("Helvetica", 65, &Rectangle::new(0.0, 0.0, 6.0, 9.0));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    // --- Classification ---

    #[test]
    fn test_classify_healthy_glyph() {
        let loose = Rectangle::new(0.0, 0.0, 5.0, 10.0);
        assert_eq!(RepairAction::classify(u32::from('A'), 0, &loose), RepairAction::Remember);
        assert_eq!(RepairAction::classify(SPACE, 0, &loose), RepairAction::Remember);
        assert_eq!(RepairAction::classify(LINE_FEED, 0, &loose), RepairAction::Skip);
        assert_eq!(RepairAction::classify(u32::from('A'), 90, &loose), RepairAction::Skip);
    }

    #[test]
    fn test_classify_degenerate_glyph() {
        let loose = Rectangle::new(5.0, 0.0, 5.0, 10.0);
        assert_eq!(RepairAction::classify(u32::from('A'), 0, &loose), RepairAction::Restore);
        assert_eq!(RepairAction::classify(u32::from('A'), 90, &loose), RepairAction::Restore);
        assert_eq!(RepairAction::classify(SPACE, 0, &loose), RepairAction::Skip);
        assert_eq!(RepairAction::classify(CARRIAGE_RETURN, 0, &loose), RepairAction::Skip);
        assert_eq!(RepairAction::classify(SPACE, 90, &loose), RepairAction::Restore);
    }

    // --- Cache ---

    #[test]
    fn test_first_box_wins() {
        let mut cache = BboxCache::new();
        let sig = GlyphSignature::new("F", 65, &tight());
        let origin = Point::new(100.0, 200.0);
        assert!(cache.remember(sig.clone(), &Rectangle::new(100.0, 198.0, 106.0, 208.0), origin, 0));
        assert!(!cache.remember(sig.clone(), &Rectangle::new(100.0, 190.0, 200.0, 300.0), origin, 0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&sig), Some(&Rectangle::new(0.0, -2.0, 6.0, 8.0)));
    }

    #[test]
    fn test_restore_translates_to_new_origin() {
        let mut cache = BboxCache::new();
        let sig = GlyphSignature::new("F", 65, &tight());
        cache.remember(
            sig.clone(),
            &Rectangle::new(100.0, 198.0, 106.0, 208.0),
            Point::new(100.0, 200.0),
            0,
        );
        let restored = cache.restore(&sig, Point::new(10.0, 20.0), 0);
        assert_eq!(restored, Some(Rectangle::new(10.0, 18.0, 16.0, 28.0)));
    }

    #[test]
    fn test_restore_applies_rotation() {
        let mut cache = BboxCache::new();
        let sig = GlyphSignature::new("F", 65, &tight());
        cache.remember(
            sig.clone(),
            &Rectangle::new(0.0, -2.0, 6.0, 8.0),
            Point::new(0.0, 0.0),
            0,
        );
        // Canonical (0,-2)-(6,8) rotated by -90: x in [-2, 8], y in [-6, 0].
        let restored = cache.restore(&sig, Point::new(50.0, 50.0), 90);
        assert_eq!(restored, Some(Rectangle::new(48.0, 44.0, 58.0, 50.0)));
    }

    #[test]
    fn test_restore_miss() {
        let cache = BboxCache::new();
        let sig = GlyphSignature::new("F", 65, &tight());
        assert!(cache.is_empty());
        assert_eq!(cache.restore(&sig, Point::new(0.0, 0.0), 0), None);
    }

    #[test]
    fn test_canonical_roundtrip_is_exact_for_quarter_turns() {
        let bbox = Rectangle::new(12.5, 30.25, 19.75, 41.0);
        let origin = Point::new(12.5, 32.0);
        for rotation in [0, 90, 180, 270] {
            let canonical = BboxCache::canonical(&bbox, origin, rotation);
            let back = canonical.rotated(-rotation).translated(origin);
            assert_eq!(back, bbox, "rotation {rotation}");
        }
    }

    #[test]
    fn test_repair_is_independent_of_where_glyph_was_seen() {
        // The same glyph remembered on two different pages at two different
        // origins produces the same canonical box.
        let sig = GlyphSignature::new("F", 65, &tight());
        let mut first = BboxCache::new();
        first.remember(sig.clone(), &Rectangle::new(10.0, 8.0, 16.0, 18.0), Point::new(10.0, 10.0), 0);
        let mut second = BboxCache::new();
        second.remember(sig.clone(), &Rectangle::new(300.0, 498.0, 306.0, 508.0), Point::new(300.0, 500.0), 0);
        assert_eq!(first.get(&sig), second.get(&sig));
        let at = Point::new(77.0, 88.0);
        assert_eq!(first.restore(&sig, at, 0), second.restore(&sig, at, 0));
    }
}
