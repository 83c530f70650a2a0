//! pdflayout-core: Provider-independent layout types and algorithms.
//!
//! This crate provides the geometry value types (Point, Rectangle, Line,
//! Transform), style codes, the page coordinate frame, and the pure layout
//! algorithms (glyph line bucketing, graphic clustering, glyph box repair,
//! whole-word text search) used by pdflayout. It never talks to a PDF engine.

pub mod charlines;
pub mod cluster;
pub mod color;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod options;
pub mod repair;
pub mod search;
pub mod style;

pub use charlines::{CharLine, CharLines};
pub use cluster::{Cluster, Region, graphic_clusters};
pub use color::Rgba;
pub use error::{LayoutError, LayoutWarning, WarningCode};
pub use frame::PageFrame;
pub use geometry::{Bounded, Line, Point, Rectangle, Transform};
pub use options::{ClusterOptions, LayoutOptions, SearchOptions};
pub use repair::{BboxCache, GlyphSignature, RepairAction};
pub use search::find_words;
pub use style::{LineCap, LineJoin, RenderMode, SegmentKind};
