/// Document-wide layout configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Fraction of `min(page width, page height)` used as the default
    /// clustering overlap tolerance.
    pub cluster_tolerance_ratio: f64,
    /// Run the degenerate glyph box repair pass when a page is loaded.
    pub repair_bboxes: bool,
    /// Collect [`LayoutWarning`](crate::LayoutWarning)s on each page.
    pub collect_warnings: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            cluster_tolerance_ratio: 0.01,
            repair_bboxes: true,
            collect_warnings: true,
        }
    }
}

impl LayoutOptions {
    /// Default clustering tolerance for a page of the given size.
    pub fn cluster_tolerance(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.cluster_tolerance_ratio
    }
}

/// Per-call options for graphic clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterOptions {
    /// Overlap tolerance in page units. `None` derives it from the page size.
    pub atol: Option<f64>,
}

impl ClusterOptions {
    pub fn with_atol(atol: f64) -> Self {
        Self { atol: Some(atol) }
    }
}

/// Per-call options for text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    /// Compare letters exactly. When off, letters match by their lowercase forms.
    pub case_sensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

impl SearchOptions {
    pub fn ignore_case() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_default() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.cluster_tolerance_ratio, 0.01);
        assert!(opts.repair_bboxes);
        assert!(opts.collect_warnings);
    }

    #[test]
    fn test_cluster_tolerance_uses_shorter_side() {
        let opts = LayoutOptions::default();
        assert!((opts.cluster_tolerance(600.0, 800.0) - 6.0).abs() < 1e-12);
        assert!((opts.cluster_tolerance(800.0, 600.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_cluster_options() {
        assert_eq!(ClusterOptions::default().atol, None);
        assert_eq!(ClusterOptions::with_atol(0.0).atol, Some(0.0));
    }
}
