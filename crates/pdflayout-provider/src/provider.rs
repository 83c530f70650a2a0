//! The primitive provider contract.
//!
//! A provider is the PDF engine behind pdflayout: it opens files, owns the
//! native handles, and answers per-glyph and per-object geometry queries in
//! its own (rotated) page space. pdflayout normalizes everything it reads.

use pdflayout_core::{LayoutError, Point, Rectangle, Rgba, Transform};

/// Font name and descriptor flags of a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontInfo {
    pub name: String,
    /// PDF font descriptor flags (bit 19 is ForceBold).
    pub flags: u32,
}

impl FontInfo {
    pub fn new(name: impl Into<String>, flags: u32) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }
}

/// Page object classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Path,
    Image,
    /// Text, shading, form XObject, or anything pdflayout does not model.
    Other,
}

/// One point of a path's segment list as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSegment {
    /// End point in the path's local coordinates.
    pub point: Point,
    /// Segment type code: 0 = line, 1 = bezier, 2 = move.
    pub kind: i32,
    /// Whether this segment closes the current subpath.
    pub close: bool,
}

impl RawSegment {
    pub fn new(point: Point, kind: i32, close: bool) -> Self {
        Self { point, kind, close }
    }
}

/// A link annotation pointing inside the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawObjLink {
    /// Annotation rectangle in provider space.
    pub bbox: Rectangle,
    /// 0-based destination page, if the destination resolves to a page.
    pub dest_page: Option<usize>,
}

/// One entry of the document outline, flattened depth first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutlineItem {
    /// Nesting depth, 0 for top-level entries.
    pub level: usize,
    pub title: String,
    /// 0-based target page, if the entry resolves to one.
    pub page: Option<usize>,
}

/// A named destination from the document catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDestination {
    pub name: String,
    /// 0-based target page, if the destination resolves to one.
    pub page: Option<usize>,
}

/// Attributes of a tagged-PDF structure element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructInfo {
    /// Structure type, e.g. `"Table"` or `"P"`.
    pub kind: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub id: Option<String>,
    pub language: Option<String>,
    /// Marked content id, when the element wraps marked content.
    pub marked_id: Option<i32>,
}

/// Trait abstracting the PDF engine that pdflayout reads primitives from.
///
/// All functions are associated functions over the handle types, so a
/// provider is a zero-sized marker type and handles carry all state.
///
/// # Handle lifecycle
///
/// pdflayout acquires `Page`, then `TextPage`, then `WebLinks`, then
/// `StructTree`, and releases them through the matching `close_*` functions
/// in exactly the reverse order. The `Document` is closed last. Handles are
/// passed by value to `close_*` and never used again.
///
/// # Coordinates
///
/// Every geometry value is in provider page space: bottom-left origin, with
/// the page's `/Rotate` not yet undone. `page_width`/`page_height` are the
/// rotated page size.
///
/// # Usage
///
/// ```ignore
/// let page = MyProvider::load_page(&doc, 0)?;
/// let text = MyProvider::load_text_page(&page)?;
/// for i in 0..MyProvider::char_count(&text) {
///     let bbox = MyProvider::char_loose_box(&text, i)?;
/// }
/// MyProvider::close_text_page(text);
/// MyProvider::close_page(page);
/// ```
pub trait PrimitiveProvider {
    /// An open document.
    type Document;
    /// A loaded page.
    type Page;
    /// The text extraction handle of a page.
    type TextPage;
    /// The web link detection handle of a text page.
    type WebLinks;
    /// The structure tree handle of a page.
    type StructTree;
    /// A page object (path, image, or other).
    type Object: Clone;
    /// A structure tree element.
    type StructElement: Clone;
    /// Provider-specific error type, convertible to [`LayoutError`].
    type Error: std::error::Error + Into<LayoutError>;

    // --- Document and handle lifecycle ---

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Load a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the page cannot be loaded.
    fn load_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Load the text extraction handle of a page.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot extract text from the page.
    fn load_text_page(page: &Self::Page) -> Result<Self::TextPage, Self::Error>;

    /// Run web link detection over a text page.
    ///
    /// # Errors
    ///
    /// Returns an error if link detection fails.
    fn load_web_links(text: &Self::TextPage) -> Result<Self::WebLinks, Self::Error>;

    /// Load the structure tree of a page. Untagged pages yield an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the structure tree exists but cannot be read.
    fn load_struct_tree(page: &Self::Page) -> Result<Self::StructTree, Self::Error>;

    fn close_struct_tree(tree: Self::StructTree);
    fn close_web_links(links: Self::WebLinks);
    fn close_text_page(text: Self::TextPage);
    fn close_page(page: Self::Page);
    fn close_document(doc: Self::Document);

    // --- Document catalog ---

    /// Whether the catalog marks the document as tagged PDF.
    fn is_tagged(doc: &Self::Document) -> bool;

    /// A document information entry such as `"Title"` or `"Producer"`.
    /// Absent entries yield `None`.
    fn meta_text(doc: &Self::Document, tag: &str) -> Result<Option<String>, Self::Error>;

    /// The display label of a page (e.g. `"iv"`), if the document defines
    /// page labels.
    fn page_label(doc: &Self::Document, index: usize) -> Result<Option<String>, Self::Error>;

    /// The document outline in reading order. May contain duplicates.
    fn outline(doc: &Self::Document) -> Result<Vec<RawOutlineItem>, Self::Error>;

    fn named_destinations(doc: &Self::Document) -> Result<Vec<RawDestination>, Self::Error>;

    // --- Page geometry ---

    fn page_width(page: &Self::Page) -> f64;
    fn page_height(page: &Self::Page) -> f64;

    /// Intrinsic page rotation in degrees (0, 90, 180, or 270).
    fn page_rotation(page: &Self::Page) -> i32;

    // --- Glyphs ---

    fn char_count(text: &Self::TextPage) -> usize;

    /// Unicode code point of a glyph.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    fn char_unicode(text: &Self::TextPage, index: usize) -> Result<u32, Self::Error>;

    /// Text angle of a glyph, rounded to whole degrees.
    fn char_angle(text: &Self::TextPage, index: usize) -> Result<i32, Self::Error>;

    fn char_origin(text: &Self::TextPage, index: usize) -> Result<Point, Self::Error>;

    /// The loose box, which approximates inter-glyph spacing and may be
    /// degenerate.
    fn char_loose_box(text: &Self::TextPage, index: usize) -> Result<Rectangle, Self::Error>;

    /// The tight box around the glyph's ink, always well formed.
    fn char_tight_box(text: &Self::TextPage, index: usize) -> Result<Rectangle, Self::Error>;

    fn char_font(text: &Self::TextPage, index: usize) -> Result<FontInfo, Self::Error>;
    fn char_font_size(text: &Self::TextPage, index: usize) -> Result<f64, Self::Error>;
    fn char_font_weight(text: &Self::TextPage, index: usize) -> Result<i32, Self::Error>;

    /// Text render mode code (`Tr` operator), `-1` if unknown.
    fn char_render_mode(text: &Self::TextPage, index: usize) -> Result<i32, Self::Error>;

    fn char_fill_color(text: &Self::TextPage, index: usize) -> Result<Rgba, Self::Error>;
    fn char_stroke_color(text: &Self::TextPage, index: usize) -> Result<Rgba, Self::Error>;

    /// Text of the glyphs inside `area` (provider space), in content order.
    fn bounded_text(text: &Self::TextPage, area: &Rectangle) -> Result<String, Self::Error>;

    // --- Page objects ---

    fn object_count(page: &Self::Page) -> usize;

    /// Access a page object by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    fn object(page: &Self::Page, index: usize) -> Result<Self::Object, Self::Error>;

    fn object_kind(obj: &Self::Object) -> ObjectKind;

    /// Bounding box of an object in provider space, matrix already applied.
    fn object_bounds(obj: &Self::Object) -> Result<Rectangle, Self::Error>;

    /// The object's transform from local to provider page space.
    fn object_matrix(obj: &Self::Object) -> Result<Transform, Self::Error>;

    /// Segment list of a path object, in local coordinates.
    fn path_segments(obj: &Self::Object) -> Result<Vec<RawSegment>, Self::Error>;

    fn path_fill_color(obj: &Self::Object) -> Result<Rgba, Self::Error>;
    fn path_stroke_color(obj: &Self::Object) -> Result<Rgba, Self::Error>;
    fn path_stroke_width(obj: &Self::Object) -> Result<f64, Self::Error>;

    /// Line cap code: 0 = butt, 1 = round, 2 = projecting square.
    fn path_line_cap(obj: &Self::Object) -> Result<i32, Self::Error>;

    /// Line join code: 0 = miter, 1 = round, 2 = bevel.
    fn path_line_join(obj: &Self::Object) -> Result<i32, Self::Error>;

    // --- Links ---

    /// Link annotations of a page that point inside the document.
    fn object_links(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Vec<RawObjLink>, Self::Error>;

    fn web_link_count(links: &Self::WebLinks) -> usize;
    fn web_link_url(links: &Self::WebLinks, index: usize) -> Result<String, Self::Error>;

    /// The rectangles covering a web link's text, in provider space.
    fn web_link_rects(links: &Self::WebLinks, index: usize)
    -> Result<Vec<Rectangle>, Self::Error>;

    /// The glyph range `(start, count)` of a web link, if known.
    fn web_link_char_range(
        links: &Self::WebLinks,
        index: usize,
    ) -> Result<Option<(usize, usize)>, Self::Error>;

    // --- Structure tree ---

    fn struct_children(tree: &Self::StructTree) -> Result<Vec<Self::StructElement>, Self::Error>;

    fn struct_element_children(
        elem: &Self::StructElement,
    ) -> Result<Vec<Self::StructElement>, Self::Error>;

    fn struct_element_info(elem: &Self::StructElement) -> Result<StructInfo, Self::Error>;

    /// A string attribute of a structure element, e.g. `"Summary"`.
    fn struct_element_attribute(
        elem: &Self::StructElement,
        name: &str,
    ) -> Result<Option<String>, Self::Error>;
}
