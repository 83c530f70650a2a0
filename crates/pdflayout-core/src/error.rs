//! Error and warning types for pdflayout.
//!
//! Provides [`LayoutError`] for fatal errors (a provider broke its contract,
//! a handle was already released) and [`LayoutWarning`] for heuristic
//! recoveries that keep the best-effort value and continue.

use std::fmt;

use thiserror::Error;

/// Fatal error types.
///
/// These indicate a corrupt or unsupported input document and are never
/// retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A required provider query failed.
    #[error("provider error: {0}")]
    Provider(String),
    /// The page reported a rotation that is not a multiple of 90 degrees.
    #[error("invalid page rotation: {0} degrees")]
    InvalidRotation(i32),
    /// A path violated the segment list contract.
    #[error("invalid path {index}: {reason}")]
    InvalidPath {
        /// Page object index of the path.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A style code reported by the provider is out of range.
    #[error("invalid {kind} code: {code}")]
    InvalidStyleCode {
        /// Which enum the code was meant for (e.g. "cap").
        kind: &'static str,
        /// The raw code.
        code: i32,
    },
    /// A page index past the end of the document.
    #[error("page index {index} out of range (0..{count})")]
    PageOutOfRange { index: usize, count: usize },
    /// A provider handle was used after it had been released.
    #[error("{0} handle already released")]
    HandleReleased(&'static str),
}

/// Machine-readable category of a [`LayoutWarning`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarningCode {
    /// A degenerate glyph box could not be repaired from the cache.
    UnrepairedBbox,
    /// A web link referenced characters past the end of the page.
    LinkRangeOutOfBounds,
}

impl WarningCode {
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::UnrepairedBbox => "UNREPAIRED_BBOX",
            WarningCode::LinkRangeOutOfBounds => "LINK_RANGE_OUT_OF_BOUNDS",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while building a page's layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutWarning {
    pub code: WarningCode,
    pub description: String,
    /// Page index (0-based), if applicable.
    pub page: Option<usize>,
    /// Element context (e.g. "char 42").
    pub element: Option<String>,
}

impl LayoutWarning {
    pub fn new(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            element: None,
        }
    }

    /// Attach page and element context.
    pub fn with_context(mut self, page: usize, element: impl Into<String>) -> Self {
        self.page = Some(page);
        self.element = Some(element.into());
        self
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page}")?;
            if let Some(ref element) = self.element {
                write!(f, ", {element}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
