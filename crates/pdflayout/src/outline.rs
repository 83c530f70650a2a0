//! Document outline and named destinations.

use std::fmt;

/// A bookmark of the document outline.
///
/// Two items are the same bookmark when they share page and title; the
/// level is carried along for display and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    /// Nesting depth, 0 for top-level entries.
    pub level: usize,
    pub title: String,
    /// 0-based target page, if the entry resolves to one.
    pub page: Option<usize>,
}

impl fmt::Display for OutlineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "O({page}, {}, {})", self.level, self.title),
            None => write!(f, "O(?, {}, {})", self.level, self.title),
        }
    }
}

/// A named destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
    /// 0-based target page, if the destination resolves to one.
    pub page: Option<usize>,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "Dest({}, {page})", self.name),
            None => write!(f, "Dest({}, ?)", self.name),
        }
    }
}
