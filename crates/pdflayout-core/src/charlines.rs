//! Glyphs bucketed into text lines by vertical midpoint.

use std::collections::BTreeMap;

use crate::geometry::{Bounded, Point, Rectangle};

/// Buckets are one tenth of a page unit tall.
const BUCKETS_PER_UNIT: f64 = 10.0;

/// Extra band scanned on each side of a query so that rounding a midpoint
/// into its bucket never drops a glyph that lies inside the area.
const BAND_MARGIN: f64 = 1.0 / BUCKETS_PER_UNIT;

/// Bucket index of a vertical position.
///
/// `f64::round` rounds ties away from zero, so an exact half bucket goes up
/// for positive positions. This is applied to the binary product `y * 10`,
/// not to a decimal rendering of `y`, and differs from round-half-to-even.
fn line_key(y: f64) -> i64 {
    (y * BUCKETS_PER_UNIT).round() as i64
}

/// One text line: every glyph whose midpoint rounds to `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct CharLine<T> {
    y: f64,
    items: Vec<T>,
    midpoints: Vec<Point>,
}

impl<T> CharLine<T> {
    /// The rounded vertical position of the line.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// The line's glyphs, left to right.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, Point)> {
        self.items.iter().zip(self.midpoints.iter().copied())
    }
}

/// Glyphs ordered by line (bottom to top) and within a line by horizontal
/// midpoint (left to right).
///
/// Built once per page and cached by the caller; [`CharLines::in_area`]
/// uses the ordering to stop scanning early.
///
/// # Example
///
/// ```
/// use pdflayout_core::{CharLines, Rectangle};
///
/// let boxes = [
///     Rectangle::new(20.0, 100.0, 30.0, 110.0),
///     Rectangle::new(10.0, 100.0, 20.0, 110.0),
///     Rectangle::new(10.0, 50.0, 20.0, 60.0),
/// ];
/// let lines = CharLines::new(boxes);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines.lines()[1].items()[0], boxes[1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CharLines<T> {
    lines: Vec<CharLine<T>>,
}

impl<T> Default for CharLines<T> {
    fn default() -> Self {
        Self { lines: Vec::new() }
    }
}

impl<T: Bounded> CharLines<T> {
    /// Bucket items by the midpoint of their own bounding box.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::from_midpoints(items.into_iter().map(|item| {
            let mid = item.bbox().midpoint();
            (item, mid)
        }))
    }
}

impl<T> CharLines<T> {
    /// Bucket items by an explicitly supplied midpoint.
    pub fn from_midpoints(items: impl IntoIterator<Item = (T, Point)>) -> Self {
        let mut buckets: BTreeMap<i64, Vec<(T, Point)>> = BTreeMap::new();
        for (item, mid) in items {
            buckets.entry(line_key(mid.y)).or_default().push((item, mid));
        }
        let lines = buckets
            .into_iter()
            .map(|(key, mut entries)| {
                entries.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));
                let (items, midpoints) = entries.into_iter().unzip();
                CharLine {
                    y: key as f64 / BUCKETS_PER_UNIT,
                    items,
                    midpoints,
                }
            })
            .collect();
        Self { lines }
    }

    /// Lines from bottom to top.
    pub fn lines(&self) -> &[CharLine<T>] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every item in line order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.lines.iter().flat_map(|line| line.items.iter())
    }

    /// Items whose midpoint lies inside `area` (inclusive), in line order.
    ///
    /// Lines above the area end the scan, and within a line the scan stops
    /// at the first glyph right of the area.
    pub fn in_area(&self, area: &Rectangle) -> Vec<&T> {
        let mut found = Vec::new();
        for line in &self.lines {
            if line.y > area.top() + BAND_MARGIN {
                break;
            }
            if line.y < area.bottom() - BAND_MARGIN {
                continue;
            }
            for (item, mid) in line.iter() {
                if mid.x > area.right() {
                    break;
                }
                if area.contains(mid) {
                    found.push(item);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(x: f64, y: f64) -> Rectangle {
        Rectangle::new(x - 2.0, y - 4.0, x + 2.0, y + 4.0)
    }

    #[test]
    fn test_line_key_rounds_half_away_from_zero() {
        assert_eq!(line_key(0.25), 3);
        assert_eq!(line_key(-0.25), -3);
        assert_eq!(line_key(706.0), 7060);
        assert_eq!(line_key(706.04), 7060);
    }

    #[test]
    fn test_lines_sorted_bottom_to_top() {
        let lines = CharLines::new([glyph(10.0, 700.0), glyph(10.0, 100.0), glyph(10.0, 400.0)]);
        let ys: Vec<f64> = lines.lines().iter().map(CharLine::y).collect();
        assert_eq!(ys, vec![100.0, 400.0, 700.0]);
    }

    #[test]
    fn test_glyphs_sorted_left_to_right() {
        let lines = CharLines::new([glyph(30.0, 100.0), glyph(10.0, 100.0), glyph(20.0, 100.0)]);
        assert_eq!(lines.len(), 1);
        let xs: Vec<f64> = lines.lines()[0].iter().map(|(_, mid)| mid.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_midpoints_rounded_to_one_decimal() {
        let lines = CharLines::new([glyph(10.0, 100.02), glyph(20.0, 99.98), glyph(30.0, 100.2)]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.lines()[0].y(), 100.0);
        assert_eq!(lines.lines()[0].len(), 2);
        assert_eq!(lines.lines()[1].y(), 100.2);
    }

    #[test]
    fn test_iter_visits_every_item_once() {
        let boxes = [glyph(1.0, 1.0), glyph(2.0, 5.0), glyph(3.0, 1.0)];
        let lines = CharLines::new(boxes);
        assert_eq!(lines.iter().count(), 3);
    }

    #[test]
    fn test_from_midpoints_with_indices() {
        let lines = CharLines::from_midpoints([(0usize, Point::new(5.0, 5.0)), (1, Point::new(1.0, 5.0))]);
        assert_eq!(lines.lines()[0].items(), &[1, 0]);
    }

    #[test]
    fn test_empty() {
        let lines: CharLines<Rectangle> = CharLines::new([]);
        assert!(lines.is_empty());
        assert!(lines.in_area(&Rectangle::new(0.0, 0.0, 100.0, 100.0)).is_empty());
    }

    // --- Area query ---

    #[test]
    fn test_in_area_basic() {
        let boxes = [glyph(10.0, 10.0), glyph(50.0, 10.0), glyph(10.0, 50.0), glyph(50.0, 50.0)];
        let lines = CharLines::new(boxes);
        let hits = lines.in_area(&Rectangle::new(0.0, 0.0, 30.0, 60.0));
        assert_eq!(hits, vec![&boxes[0], &boxes[2]]);
    }

    #[test]
    fn test_in_area_edges_are_inclusive() {
        let boxes = [glyph(10.0, 10.0)];
        let lines = CharLines::new(boxes);
        assert_eq!(lines.in_area(&Rectangle::new(10.0, 10.0, 20.0, 20.0)).len(), 1);
        assert_eq!(lines.in_area(&Rectangle::new(0.0, 0.0, 10.0, 10.0)).len(), 1);
        assert!(lines.in_area(&Rectangle::new(10.01, 0.0, 20.0, 20.0)).is_empty());
    }

    #[test]
    fn test_in_area_near_bucket_boundary() {
        // Midpoint 10.04 lands in bucket 10.0, below a query starting at 10.02.
        let boxes = [glyph(5.0, 10.04), glyph(5.0, 10.01)];
        let lines = CharLines::new(boxes);
        let hits = lines.in_area(&Rectangle::new(0.0, 10.02, 10.0, 20.0));
        assert_eq!(hits, vec![&boxes[0]]);
        // And a glyph at 10.06 (bucket 10.1) just above a query ending at 10.07.
        let boxes = [glyph(5.0, 10.06)];
        let lines = CharLines::new(boxes);
        assert_eq!(lines.in_area(&Rectangle::new(0.0, 0.0, 10.0, 10.07)).len(), 1);
        assert!(lines.in_area(&Rectangle::new(0.0, 0.0, 10.0, 10.05)).is_empty());
    }

    #[test]
    fn test_in_area_matches_brute_force() {
        let mut boxes = Vec::new();
        for i in 0..40 {
            for j in 0..15 {
                let x = f64::from(i) * 13.7 % 500.0;
                let y = f64::from(j) * 47.3 + f64::from(i) * 0.037;
                boxes.push(glyph(x, y));
            }
        }
        let lines = CharLines::new(boxes.iter().copied());
        let areas = [
            Rectangle::new(0.0, 0.0, 600.0, 800.0),
            Rectangle::new(100.0, 94.6, 300.0, 300.0),
            Rectangle::new(13.7, 47.3, 13.7, 47.337),
            Rectangle::new(250.0, 500.0, 260.0, 700.0),
            Rectangle::new(-10.0, -10.0, -1.0, -1.0),
        ];
        for area in &areas {
            let mut expected: Vec<Rectangle> = boxes
                .iter()
                .filter(|b| area.contains(b.midpoint()))
                .copied()
                .collect();
            let mut actual: Vec<Rectangle> = lines.in_area(area).into_iter().copied().collect();
            let key = |r: &Rectangle| (r.x(), r.y());
            expected.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap());
            actual.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap());
            assert_eq!(actual, expected, "area {area:?}");
        }
    }
}
