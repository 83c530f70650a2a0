//! Graphic clustering: group vector paths and images into rectangular regions.
//!
//! Shapes are merged in two interval passes. Pass 1 sweeps shapes bottom to
//! top and merges their vertical extents into bands. Pass 2 sweeps all shapes
//! left to right and, inside each band, merges horizontal extents into
//! sub-bands. Each (band, sub-band) pair becomes one [`Cluster`], a probable
//! table or figure.
//!
//! Merging is first-match: a shape joins the first existing region it
//! overlaps, and regions are never merged with each other afterwards. Two
//! regions that only become connected by a later shape stay separate.

use crate::geometry::{Bounded, Point, Rectangle};

/// An interval accumulator used while clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct Region<T> {
    pub v0: f64,
    pub v1: f64,
    pub members: Vec<T>,
    pub subregions: Vec<Region<T>>,
}

impl<T> Region<T> {
    pub fn new(v0: f64, v1: f64, member: T) -> Self {
        Self {
            v0,
            v1,
            members: vec![member],
            subregions: Vec::new(),
        }
    }

    /// Whether `[o0, o1]` overlaps this interval, allowing a gap of `atol`.
    pub fn overlaps(&self, o0: f64, o1: f64, atol: f64) -> bool {
        self.v0 - atol <= o1 && o0 <= self.v1 + atol
    }

    /// Whether `v` lies inside this interval, widened by `atol` on both sides.
    pub fn contains(&self, v: f64, atol: f64) -> bool {
        self.v0 - atol <= v && v <= self.v1 + atol
    }

    fn absorb(&mut self, o0: f64, o1: f64, member: T) {
        self.v0 = self.v0.min(o0);
        self.v1 = self.v1.max(o1);
        self.members.push(member);
    }
}

/// Add `[o0, o1]` to the first overlapping region, or start a new one.
fn merge_first<T>(regions: &mut Vec<Region<T>>, o0: f64, o1: f64, member: T, atol: f64) {
    match regions.iter_mut().find(|r| r.overlaps(o0, o1, atol)) {
        Some(region) => region.absorb(o0, o1, member),
        None => regions.push(Region::new(o0, o1, member)),
    }
}

/// A clustered region of shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<T> {
    pub bbox: Rectangle,
    pub members: Vec<T>,
}

fn sorted_by<T: Bounded>(shapes: &[T], key: impl Fn(&Rectangle) -> f64) -> Vec<&T> {
    let mut sorted: Vec<&T> = shapes.iter().collect();
    sorted.sort_by(|a, b| key(&a.bbox()).total_cmp(&key(&b.bbox())));
    sorted
}

/// Pass 1: merge vertical extents of shapes sorted by vertical center.
fn vertical_regions<T: Bounded + Clone>(shapes: &[T], atol: f64) -> Vec<Region<T>> {
    let mut regions = Vec::new();
    for shape in sorted_by(shapes, Rectangle::y) {
        let bbox = shape.bbox();
        merge_first(&mut regions, bbox.bottom(), bbox.top(), shape.clone(), atol);
    }
    regions
}

/// Pass 2: inside each band, merge horizontal extents of every shape whose
/// vertical center falls in the band.
fn split_horizontally<T: Bounded + Clone>(regions: &mut [Region<T>], shapes: &[T], atol: f64) {
    let by_x = sorted_by(shapes, Rectangle::x);
    for region in regions.iter_mut() {
        for shape in &by_x {
            let bbox = shape.bbox();
            if region.contains(bbox.y(), atol) {
                let member = (*shape).clone();
                merge_first(&mut region.subregions, bbox.left(), bbox.right(), member, atol);
            }
        }
    }
}

fn vertical_extent<T: Bounded>(members: &[T]) -> (f64, f64) {
    members
        .iter()
        .map(Bounded::bbox)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| {
            (lo.min(b.bottom()), hi.max(b.top()))
        })
}

/// Cluster shapes into regions, returned top-to-bottom, left-to-right.
///
/// `atol` is the gap tolerated between two intervals that still merge. An
/// empty input yields no clusters.
///
/// # Example
///
/// ```
/// use pdflayout_core::{Rectangle, graphic_clusters};
///
/// let shapes = [
///     Rectangle::new(0.0, 10.0, 5.0, 20.0),
///     Rectangle::new(0.0, 19.0, 5.0, 30.0),
/// ];
/// let clusters = graphic_clusters(&shapes, 0.0);
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].bbox, Rectangle::new(0.0, 10.0, 5.0, 30.0));
/// ```
pub fn graphic_clusters<T: Bounded + Clone>(shapes: &[T], atol: f64) -> Vec<Cluster<T>> {
    let mut regions = vertical_regions(shapes, atol);
    split_horizontally(&mut regions, shapes, atol);

    let mut clusters = Vec::new();
    for yreg in regions {
        let split = yreg.subregions.len() > 1;
        for xreg in yreg.subregions {
            // Strip the height down again when the band was split.
            let (y0, y1) = if split {
                vertical_extent(&xreg.members)
            } else {
                (yreg.v0, yreg.v1)
            };
            clusters.push(Cluster {
                bbox: Rectangle::from_corners(Point::new(xreg.v0, y0), Point::new(xreg.v1, y1)),
                members: xreg.members,
            });
        }
    }

    clusters.sort_by(|a, b| {
        b.bbox
            .y()
            .total_cmp(&a.bbox.y())
            .then(a.bbox.x().total_cmp(&b.bbox.x()))
    });
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rectangle {
        Rectangle::new(x0, y0, x1, y1)
    }

    // --- Region ---

    #[test]
    fn test_region_overlap_with_tolerance() {
        let r = Region::new(10.0, 20.0, ());
        assert!(r.overlaps(19.0, 30.0, 0.0));
        assert!(r.overlaps(20.0, 30.0, 0.0));
        assert!(!r.overlaps(21.0, 30.0, 0.0));
        assert!(r.overlaps(21.0, 30.0, 1.0));
        assert!(r.overlaps(0.0, 10.0, 0.0));
        assert!(!r.overlaps(0.0, 9.5, 0.0));
    }

    #[test]
    fn test_region_contains_with_tolerance() {
        let r = Region::new(10.0, 20.0, ());
        assert!(r.contains(10.0, 0.0));
        assert!(r.contains(20.0, 0.0));
        assert!(!r.contains(20.5, 0.0));
        assert!(r.contains(20.5, 0.5));
    }

    #[test]
    fn test_region_only_grows() {
        let mut regions = vec![Region::new(10.0, 20.0, 0)];
        merge_first(&mut regions, 12.0, 15.0, 1, 0.0);
        assert_eq!((regions[0].v0, regions[0].v1), (10.0, 20.0));
        merge_first(&mut regions, 5.0, 12.0, 2, 0.0);
        assert_eq!((regions[0].v0, regions[0].v1), (5.0, 20.0));
        assert_eq!(regions[0].members, vec![0, 1, 2]);
    }

    // --- Pass 1 ---

    #[test]
    fn test_touching_extents_merge() {
        let shapes = [rect(0.0, 10.0, 5.0, 20.0), rect(0.0, 19.0, 5.0, 30.0)];
        let regions = vertical_regions(&shapes, 0.0);
        assert_eq!(regions.len(), 1);
        assert_eq!((regions[0].v0, regions[0].v1), (10.0, 30.0));
        assert_eq!(regions[0].members.len(), 2);
    }

    #[test]
    fn test_separated_extents_do_not_merge() {
        let shapes = [rect(0.0, 10.0, 5.0, 20.0), rect(0.0, 21.0, 5.0, 30.0)];
        let regions = vertical_regions(&shapes, 0.0);
        assert_eq!(regions.len(), 2);
        assert_eq!((regions[0].v0, regions[0].v1), (10.0, 20.0));
        assert_eq!((regions[1].v0, regions[1].v1), (21.0, 30.0));
    }

    #[test]
    fn test_tolerance_bridges_gap() {
        let shapes = [rect(0.0, 10.0, 5.0, 20.0), rect(0.0, 21.0, 5.0, 30.0)];
        assert_eq!(vertical_regions(&shapes, 1.0).len(), 1);
    }

    #[test]
    fn test_pass_one_ignores_input_order() {
        let a = [rect(0.0, 21.0, 5.0, 30.0), rect(0.0, 10.0, 5.0, 20.0)];
        let regions = vertical_regions(&a, 0.0);
        // Sorted bottom-up before merging.
        assert_eq!((regions[0].v0, regions[0].v1), (10.0, 20.0));
    }

    // --- Full algorithm ---

    #[test]
    fn test_empty_input_yields_no_clusters() {
        let shapes: [Rectangle; 0] = [];
        assert!(graphic_clusters(&shapes, 1.0).is_empty());
    }

    #[test]
    fn test_single_shape_is_its_own_cluster() {
        let shapes = [rect(1.0, 2.0, 3.0, 4.0)];
        let clusters = graphic_clusters(&shapes, 0.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].bbox, shapes[0]);
        assert_eq!(clusters[0].members, vec![shapes[0]]);
    }

    #[test]
    fn test_side_by_side_tables_split_horizontally() {
        let shapes = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(20.0, 0.0, 30.0, 10.0),
            rect(0.0, 9.0, 10.0, 12.0),
        ];
        let clusters = graphic_clusters(&shapes, 0.5);
        assert_eq!(clusters.len(), 2);
        // Each sub-band gets its own tight vertical extent.
        assert_eq!(clusters[0].bbox, rect(0.0, 0.0, 10.0, 12.0));
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[1].bbox, rect(20.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn test_split_band_strips_height_per_subregion() {
        let shapes = [rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 5.0, 30.0, 30.0)];
        let clusters = graphic_clusters(&shapes, 0.0);
        assert_eq!(clusters.len(), 2);
        // Higher cluster first.
        assert_eq!(clusters[0].bbox, rect(20.0, 5.0, 30.0, 30.0));
        assert_eq!(clusters[1].bbox, rect(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_unsplit_band_keeps_full_extent() {
        let shapes = [rect(0.0, 0.0, 10.0, 10.0), rect(5.0, 8.0, 15.0, 30.0)];
        let clusters = graphic_clusters(&shapes, 0.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].bbox, rect(0.0, 0.0, 15.0, 30.0));
    }

    #[test]
    fn test_reading_order_top_to_bottom_left_to_right() {
        let shapes = [
            rect(50.0, 0.0, 60.0, 10.0),
            rect(0.0, 100.0, 10.0, 110.0),
            rect(0.0, 0.0, 10.0, 10.0),
        ];
        let clusters = graphic_clusters(&shapes, 0.0);
        let order: Vec<Rectangle> = clusters.iter().map(|c| c.bbox).collect();
        assert_eq!(
            order,
            vec![
                rect(0.0, 100.0, 10.0, 110.0),
                rect(0.0, 0.0, 10.0, 10.0),
                rect(50.0, 0.0, 60.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_clustering_is_deterministic() {
        let shapes: Vec<Rectangle> = (0..20)
            .map(|i| {
                let f = f64::from(i);
                rect(f * 7.0 % 50.0, f * 3.0, f * 7.0 % 50.0 + 4.0, f * 3.0 + 2.5)
            })
            .collect();
        let first = graphic_clusters(&shapes, 0.4);
        let second = graphic_clusters(&shapes, 0.4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_match_does_not_merge_regions_retroactively() {
        // A, then B (disjoint from A), then C which spans both. C joins A's
        // region only; B's region is left separate even though it now
        // overlaps.
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(0.0, 20.0, 10.0, 22.0);
        let c = rect(0.0, 8.0, 10.0, 40.0);
        let shapes = [a, b, c];

        let regions = vertical_regions(&shapes, 0.0);
        assert_eq!(regions.len(), 2);
        assert_eq!((regions[0].v0, regions[0].v1), (0.0, 40.0));
        assert_eq!((regions[1].v0, regions[1].v1), (20.0, 22.0));

        let clusters = graphic_clusters(&shapes, 0.0);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].bbox, rect(0.0, 20.0, 10.0, 22.0));
        assert_eq!(clusters[0].members, vec![b]);
        assert_eq!(clusters[1].bbox, rect(0.0, 0.0, 10.0, 40.0));
        assert_eq!(clusters[1].members, vec![a, b, c]);
    }

    #[test]
    fn test_clusters_work_over_references() {
        let shapes = [rect(0.0, 0.0, 1.0, 1.0), rect(0.5, 0.5, 2.0, 2.0)];
        let refs: Vec<&Rectangle> = shapes.iter().collect();
        let clusters = graphic_clusters(&refs, 0.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 2);
    }
}
