//! pdflayout: Reconstruct text lines and graphic regions from PDF primitives.
//!
//! This is the public API facade crate for pdflayout. It wraps a
//! [`PrimitiveProvider`](pdflayout_provider::PrimitiveProvider) document in
//! a lazily loaded model of pages, glyphs, paths, images, links, and
//! structure elements, all in an upright page frame where the origin is
//! the bottom-left corner as the page is displayed. Document-level catalog
//! entries (outline, metadata, named destinations) are read on demand.
//!
//! # Architecture
//!
//! - **pdflayout-core**: Provider-independent geometry and layout algorithms
//! - **pdflayout-provider**: The provider contract and an in-memory provider
//! - **pdflayout** (this crate): Document and page model that ties them together
//!
//! # Example
//!
//! ```
//! use pdflayout::Document;
//! use pdflayout_core::{ClusterOptions, Rectangle};
//! use pdflayout_provider::{MemoryDocument, MemoryPage, MemoryPath, MemoryProvider};
//!
//! let raw = MemoryDocument::new(vec![
//!     MemoryPage::new(200.0, 200.0)
//!         .with_path(MemoryPath::rect(&Rectangle::new(10.0, 10.0, 50.0, 50.0)))
//!         .with_path(MemoryPath::rect(&Rectangle::new(50.0, 10.0, 90.0, 50.0))),
//! ]);
//! let doc = Document::<MemoryProvider>::new("table", raw, None);
//! let page = doc.page(0).unwrap();
//! let clusters = page.graphic_clusters(None, &ClusterOptions::default()).unwrap();
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].bbox, Rectangle::new(10.0, 10.0, 90.0, 50.0));
//! ```

mod character;
mod document;
mod graphic;
pub(crate) mod handles;
mod image;
mod link;
mod outline;
mod page;
mod path;
mod structure;
pub(crate) mod util;

pub use character::Character;
pub use document::{Document, METADATA_TAGS, PagesIter};
pub use graphic::Graphic;
pub use image::Image;
pub use link::{ObjLink, WebLink};
pub use outline::{Destination, OutlineItem};
pub use page::{GraphicPredicate, Page};
pub use path::{Path, PathPoint};
pub use structure::Structure;

pub use pdflayout_core;
pub use pdflayout_provider;
