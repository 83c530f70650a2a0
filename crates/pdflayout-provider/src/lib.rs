//! pdflayout-provider: The primitive provider contract.
//!
//! This crate defines [`PrimitiveProvider`], the trait a PDF engine
//! implements to feed glyphs, paths, images, links, structure elements, and
//! document catalog entries to pdflayout, plus [`MemoryProvider`], an
//! engine-free implementation backed by plain Rust values. It depends on
//! pdflayout-core for shared geometry types.

pub mod error;
pub mod memory;
pub mod provider;

pub use error::ProviderError;
pub use memory::{
    MemoryChar, MemoryDocument, MemoryPage, MemoryPath, MemoryProvider, MemoryStruct,
    MemoryWebLink, Resource, ResourceEvent, ResourceKind, ResourceLog,
};
pub use pdflayout_core;
pub use provider::{
    FontInfo, ObjectKind, PrimitiveProvider, RawDestination, RawObjLink, RawOutlineItem,
    RawSegment, StructInfo,
};
