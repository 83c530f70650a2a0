//! In-memory primitive provider.
//!
//! [`MemoryProvider`] serves pages described entirely in Rust values. It is
//! what the pdflayout tests and benches run against, and it records every
//! handle it opens and closes in a shared [`ResourceLog`].

use std::cell::RefCell;
use std::rc::Rc;

use pdflayout_core::{Point, Rectangle, Rgba, Transform};

use crate::error::ProviderError;
use crate::provider::{
    FontInfo, ObjectKind, PrimitiveProvider, RawDestination, RawObjLink, RawOutlineItem,
    RawSegment, StructInfo,
};

const BLACK: Rgba = Rgba(0x0000_00ff);

/// A provider handle, identified by the page it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Document,
    Page(usize),
    TextPage(usize),
    WebLinks(usize),
    StructTree(usize),
}

/// Which page-level handle a page refuses to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Page,
    TextPage,
    WebLinks,
    StructTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceEvent {
    Open(Resource),
    Close(Resource),
}

/// Shared record of handle acquisitions and releases.
#[derive(Debug, Clone, Default)]
pub struct ResourceLog(Rc<RefCell<Vec<ResourceEvent>>>);

impl ResourceLog {
    fn record(&self, event: ResourceEvent) {
        self.0.borrow_mut().push(event);
    }

    /// All events so far, oldest first.
    pub fn events(&self) -> Vec<ResourceEvent> {
        self.0.borrow().clone()
    }

    /// Handles opened and not yet closed.
    pub fn open_handles(&self) -> usize {
        self.0.borrow().iter().fold(0usize, |open, event| match event {
            ResourceEvent::Open(_) => open + 1,
            ResourceEvent::Close(_) => open.saturating_sub(1),
        })
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// One glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryChar {
    pub unicode: u32,
    pub angle: i32,
    pub origin: Point,
    pub loose: Rectangle,
    pub tight: Rectangle,
    pub font: FontInfo,
    pub size: f64,
    pub weight: i32,
    pub render_mode: i32,
    pub fill: Rgba,
    pub stroke: Rgba,
}

impl MemoryChar {
    /// An upright 12pt Helvetica glyph whose tight box equals its loose box
    /// and whose origin is the box's bottom-left corner.
    pub fn new(c: char, loose: Rectangle) -> Self {
        Self {
            unicode: u32::from(c),
            angle: 0,
            origin: loose.p0,
            loose,
            tight: loose,
            font: FontInfo::new("Helvetica", 0),
            size: 12.0,
            weight: 400,
            render_mode: 0,
            fill: BLACK,
            stroke: BLACK,
        }
    }

    pub fn with_unicode(mut self, unicode: u32) -> Self {
        self.unicode = unicode;
        self
    }

    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_tight(mut self, tight: Rectangle) -> Self {
        self.tight = tight;
        self
    }

    pub fn with_font(mut self, name: &str, flags: u32) -> Self {
        self.font = FontInfo::new(name, flags);
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_render_mode(mut self, code: i32) -> Self {
        self.render_mode = code;
        self
    }

    pub fn with_fill(mut self, fill: Rgba) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Rgba) -> Self {
        self.stroke = stroke;
        self
    }
}

/// A vector path object.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryPath {
    pub segments: Vec<RawSegment>,
    pub matrix: Transform,
    /// Explicit bounds. `None` derives them from the transformed segments.
    pub bounds: Option<Rectangle>,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub width: f64,
    pub cap: i32,
    pub join: i32,
}

impl MemoryPath {
    pub fn new(segments: Vec<RawSegment>) -> Self {
        Self {
            segments,
            matrix: Transform::identity(),
            bounds: None,
            fill: Rgba::NONE,
            stroke: BLACK,
            width: 1.0,
            cap: 0,
            join: 0,
        }
    }

    /// A closed rectangle: move to the bottom-left, three lines, close.
    pub fn rect(r: &Rectangle) -> Self {
        let [a, b, c, d] = r.points();
        Self::new(vec![
            RawSegment::new(a, 2, false),
            RawSegment::new(b, 0, false),
            RawSegment::new(c, 0, false),
            RawSegment::new(d, 0, true),
        ])
    }

    /// A single straight stroke.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(vec![
            RawSegment::new(from, 2, false),
            RawSegment::new(to, 0, false),
        ])
    }

    pub fn with_matrix(mut self, matrix: Transform) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_bounds(mut self, bounds: Rectangle) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_fill(mut self, fill: Rgba) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Rgba) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_cap(mut self, code: i32) -> Self {
        self.cap = code;
        self
    }

    pub fn with_join(mut self, code: i32) -> Self {
        self.join = code;
        self
    }

    fn computed_bounds(&self) -> Rectangle {
        self.bounds
            .or_else(|| {
                Rectangle::enclosing(
                    self.segments
                        .iter()
                        .map(|s| self.matrix.transform_point(s.point)),
                )
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ObjectData {
    Path(MemoryPath),
    Image { bounds: Rectangle, matrix: Transform },
    Other { bounds: Rectangle },
}

/// Page object handle.
#[derive(Debug, Clone)]
pub struct MemoryObject(Rc<ObjectData>);

impl MemoryObject {
    fn path(&self) -> Result<&MemoryPath, ProviderError> {
        match self.0.as_ref() {
            ObjectData::Path(path) => Ok(path),
            _ => Err(ProviderError::Contract("object is not a path".to_string())),
        }
    }
}

/// A detected web link.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryWebLink {
    pub url: String,
    pub rects: Vec<Rectangle>,
    pub range: Option<(usize, usize)>,
}

impl MemoryWebLink {
    pub fn new(url: impl Into<String>, rects: Vec<Rectangle>) -> Self {
        Self {
            url: url.into(),
            rects,
            range: None,
        }
    }

    /// Attach the glyph range `start..start + count`.
    pub fn with_range(mut self, start: usize, count: usize) -> Self {
        self.range = Some((start, count));
        self
    }
}

/// A structure tree element and its subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryStruct {
    pub info: StructInfo,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Rc<MemoryStruct>>,
}

impl MemoryStruct {
    pub fn new(kind: &str) -> Self {
        Self {
            info: StructInfo {
                kind: kind.to_string(),
                ..StructInfo::default()
            },
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.info.title = Some(title.to_string());
        self
    }

    pub fn with_alt_text(mut self, alt: &str) -> Self {
        self.info.alt_text = Some(alt.to_string());
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.info.id = Some(id.to_string());
        self
    }

    pub fn with_language(mut self, lang: &str) -> Self {
        self.info.language = Some(lang.to_string());
        self
    }

    pub fn with_marked_id(mut self, mcid: i32) -> Self {
        self.info.marked_id = Some(mcid);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: MemoryStruct) -> Self {
        self.children.push(Rc::new(child));
        self
    }
}

/// Structure element handle.
#[derive(Debug, Clone)]
pub struct MemoryStructElement(Rc<MemoryStruct>);

/// The contents of one page.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    width: f64,
    height: f64,
    rotation: i32,
    label: Option<String>,
    chars: Vec<MemoryChar>,
    objects: Vec<MemoryObject>,
    objlinks: Vec<RawObjLink>,
    weblinks: Vec<MemoryWebLink>,
    structure: Vec<Rc<MemoryStruct>>,
    fail: Option<ResourceKind>,
}

impl MemoryPage {
    /// An empty, unrotated page of the given provider-space size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_char(mut self, c: MemoryChar) -> Self {
        self.chars.push(c);
        self
    }

    pub fn with_chars(mut self, chars: impl IntoIterator<Item = MemoryChar>) -> Self {
        self.chars.extend(chars);
        self
    }

    pub fn with_path(mut self, path: MemoryPath) -> Self {
        self.objects.push(MemoryObject(Rc::new(ObjectData::Path(path))));
        self
    }

    pub fn with_image(mut self, bounds: Rectangle, matrix: Transform) -> Self {
        self.objects
            .push(MemoryObject(Rc::new(ObjectData::Image { bounds, matrix })));
        self
    }

    /// A page object that is neither path nor image (e.g. a text object).
    pub fn with_other_object(mut self, bounds: Rectangle) -> Self {
        self.objects
            .push(MemoryObject(Rc::new(ObjectData::Other { bounds })));
        self
    }

    pub fn with_object_link(mut self, bbox: Rectangle, dest_page: Option<usize>) -> Self {
        self.objlinks.push(RawObjLink { bbox, dest_page });
        self
    }

    pub fn with_web_link(mut self, link: MemoryWebLink) -> Self {
        self.weblinks.push(link);
        self
    }

    pub fn with_structure(mut self, elem: MemoryStruct) -> Self {
        self.structure.push(Rc::new(elem));
        self
    }

    /// Make loading the given handle of this page fail.
    pub fn failing(mut self, kind: ResourceKind) -> Self {
        self.fail = Some(kind);
        self
    }

    fn check(&self, kind: ResourceKind, index: usize) -> Result<(), ProviderError> {
        if self.fail == Some(kind) {
            return Err(ProviderError::Contract(format!(
                "cannot load {kind:?} of page {index}"
            )));
        }
        Ok(())
    }
}

/// An open in-memory document.
#[derive(Debug)]
pub struct MemoryDocument {
    pages: Vec<Rc<MemoryPage>>,
    tagged: bool,
    metadata: Vec<(String, String)>,
    outline: Vec<RawOutlineItem>,
    destinations: Vec<RawDestination>,
    log: ResourceLog,
}

impl MemoryDocument {
    /// Open a document. The open is recorded in the document's log.
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        let log = ResourceLog::default();
        log.record(ResourceEvent::Open(Resource::Document));
        Self {
            pages: pages.into_iter().map(Rc::new).collect(),
            tagged: false,
            metadata: Vec::new(),
            outline: Vec::new(),
            destinations: Vec::new(),
            log,
        }
    }

    /// Mark the catalog as tagged PDF.
    pub fn tagged(mut self) -> Self {
        self.tagged = true;
        self
    }

    /// Set a document information entry. An empty value reads as unset.
    pub fn with_metadata(mut self, tag: &str, value: &str) -> Self {
        self.metadata.push((tag.to_string(), value.to_string()));
        self
    }

    /// Append an outline entry, in reading order.
    pub fn with_outline(mut self, level: usize, title: &str, page: Option<usize>) -> Self {
        self.outline.push(RawOutlineItem {
            level,
            title: title.to_string(),
            page,
        });
        self
    }

    pub fn with_destination(mut self, name: &str, page: Option<usize>) -> Self {
        self.destinations.push(RawDestination {
            name: name.to_string(),
            page,
        });
        self
    }

    /// A handle on this document's event log, valid after the document closes.
    pub fn log(&self) -> ResourceLog {
        self.log.clone()
    }
}

/// Handle on one page-level resource.
#[derive(Debug)]
pub struct MemoryHandle {
    index: usize,
    page: Rc<MemoryPage>,
    log: ResourceLog,
}

impl MemoryHandle {
    fn derive(&self, kind: ResourceKind, resource: Resource) -> Result<Self, ProviderError> {
        self.page.check(kind, self.index)?;
        self.log.record(ResourceEvent::Open(resource));
        Ok(Self {
            index: self.index,
            page: Rc::clone(&self.page),
            log: self.log.clone(),
        })
    }

    fn close(self, resource: Resource) {
        self.log.record(ResourceEvent::Close(resource));
    }

    fn glyph(&self, index: usize) -> Result<&MemoryChar, ProviderError> {
        self.page.chars.get(index).ok_or(ProviderError::Missing {
            kind: "glyph",
            index,
        })
    }

    fn web_link(&self, index: usize) -> Result<&MemoryWebLink, ProviderError> {
        self.page.weblinks.get(index).ok_or(ProviderError::Missing {
            kind: "web link",
            index,
        })
    }
}

/// Zero-sized provider over [`MemoryDocument`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryProvider;

impl PrimitiveProvider for MemoryProvider {
    type Document = MemoryDocument;
    type Page = MemoryHandle;
    type TextPage = MemoryHandle;
    type WebLinks = MemoryHandle;
    type StructTree = MemoryHandle;
    type Object = MemoryObject;
    type StructElement = MemoryStructElement;
    type Error = ProviderError;

    fn page_count(doc: &MemoryDocument) -> usize {
        doc.pages.len()
    }

    fn load_page(doc: &MemoryDocument, index: usize) -> Result<MemoryHandle, ProviderError> {
        let page = doc.pages.get(index).ok_or(ProviderError::Missing {
            kind: "page",
            index,
        })?;
        page.check(ResourceKind::Page, index)?;
        doc.log.record(ResourceEvent::Open(Resource::Page(index)));
        Ok(MemoryHandle {
            index,
            page: Rc::clone(page),
            log: doc.log.clone(),
        })
    }

    fn load_text_page(page: &MemoryHandle) -> Result<MemoryHandle, ProviderError> {
        page.derive(ResourceKind::TextPage, Resource::TextPage(page.index))
    }

    fn load_web_links(text: &MemoryHandle) -> Result<MemoryHandle, ProviderError> {
        text.derive(ResourceKind::WebLinks, Resource::WebLinks(text.index))
    }

    fn load_struct_tree(page: &MemoryHandle) -> Result<MemoryHandle, ProviderError> {
        page.derive(ResourceKind::StructTree, Resource::StructTree(page.index))
    }

    fn close_struct_tree(tree: MemoryHandle) {
        let index = tree.index;
        tree.close(Resource::StructTree(index));
    }

    fn close_web_links(links: MemoryHandle) {
        let index = links.index;
        links.close(Resource::WebLinks(index));
    }

    fn close_text_page(text: MemoryHandle) {
        let index = text.index;
        text.close(Resource::TextPage(index));
    }

    fn close_page(page: MemoryHandle) {
        let index = page.index;
        page.close(Resource::Page(index));
    }

    fn close_document(doc: MemoryDocument) {
        doc.log.record(ResourceEvent::Close(Resource::Document));
    }

    fn is_tagged(doc: &MemoryDocument) -> bool {
        doc.tagged
    }

    fn meta_text(doc: &MemoryDocument, tag: &str) -> Result<Option<String>, ProviderError> {
        Ok(doc
            .metadata
            .iter()
            .rev()
            .find(|(t, _)| t == tag)
            .map(|(_, value)| value.clone()))
    }

    fn page_label(doc: &MemoryDocument, index: usize) -> Result<Option<String>, ProviderError> {
        let page = doc.pages.get(index).ok_or(ProviderError::Missing {
            kind: "page",
            index,
        })?;
        Ok(page.label.clone())
    }

    fn outline(doc: &MemoryDocument) -> Result<Vec<RawOutlineItem>, ProviderError> {
        Ok(doc.outline.clone())
    }

    fn named_destinations(doc: &MemoryDocument) -> Result<Vec<RawDestination>, ProviderError> {
        Ok(doc.destinations.clone())
    }

    fn page_width(page: &MemoryHandle) -> f64 {
        page.page.width
    }

    fn page_height(page: &MemoryHandle) -> f64 {
        page.page.height
    }

    fn page_rotation(page: &MemoryHandle) -> i32 {
        page.page.rotation
    }

    fn char_count(text: &MemoryHandle) -> usize {
        text.page.chars.len()
    }

    fn char_unicode(text: &MemoryHandle, index: usize) -> Result<u32, ProviderError> {
        Ok(text.glyph(index)?.unicode)
    }

    fn char_angle(text: &MemoryHandle, index: usize) -> Result<i32, ProviderError> {
        Ok(text.glyph(index)?.angle)
    }

    fn char_origin(text: &MemoryHandle, index: usize) -> Result<Point, ProviderError> {
        Ok(text.glyph(index)?.origin)
    }

    fn char_loose_box(text: &MemoryHandle, index: usize) -> Result<Rectangle, ProviderError> {
        Ok(text.glyph(index)?.loose)
    }

    fn char_tight_box(text: &MemoryHandle, index: usize) -> Result<Rectangle, ProviderError> {
        Ok(text.glyph(index)?.tight)
    }

    fn char_font(text: &MemoryHandle, index: usize) -> Result<FontInfo, ProviderError> {
        Ok(text.glyph(index)?.font.clone())
    }

    fn char_font_size(text: &MemoryHandle, index: usize) -> Result<f64, ProviderError> {
        Ok(text.glyph(index)?.size)
    }

    fn char_font_weight(text: &MemoryHandle, index: usize) -> Result<i32, ProviderError> {
        Ok(text.glyph(index)?.weight)
    }

    fn char_render_mode(text: &MemoryHandle, index: usize) -> Result<i32, ProviderError> {
        Ok(text.glyph(index)?.render_mode)
    }

    fn char_fill_color(text: &MemoryHandle, index: usize) -> Result<Rgba, ProviderError> {
        Ok(text.glyph(index)?.fill)
    }

    fn char_stroke_color(text: &MemoryHandle, index: usize) -> Result<Rgba, ProviderError> {
        Ok(text.glyph(index)?.stroke)
    }

    fn bounded_text(text: &MemoryHandle, area: &Rectangle) -> Result<String, ProviderError> {
        Ok(text
            .page
            .chars
            .iter()
            .filter(|c| area.contains(c.loose.midpoint()))
            .filter_map(|c| char::from_u32(c.unicode))
            .collect())
    }

    fn object_count(page: &MemoryHandle) -> usize {
        page.page.objects.len()
    }

    fn object(page: &MemoryHandle, index: usize) -> Result<MemoryObject, ProviderError> {
        page.page
            .objects
            .get(index)
            .cloned()
            .ok_or(ProviderError::Missing {
                kind: "object",
                index,
            })
    }

    fn object_kind(obj: &MemoryObject) -> ObjectKind {
        match obj.0.as_ref() {
            ObjectData::Path(_) => ObjectKind::Path,
            ObjectData::Image { .. } => ObjectKind::Image,
            ObjectData::Other { .. } => ObjectKind::Other,
        }
    }

    fn object_bounds(obj: &MemoryObject) -> Result<Rectangle, ProviderError> {
        Ok(match obj.0.as_ref() {
            ObjectData::Path(path) => path.computed_bounds(),
            ObjectData::Image { bounds, .. } | ObjectData::Other { bounds } => *bounds,
        })
    }

    fn object_matrix(obj: &MemoryObject) -> Result<Transform, ProviderError> {
        Ok(match obj.0.as_ref() {
            ObjectData::Path(path) => path.matrix,
            ObjectData::Image { matrix, .. } => *matrix,
            ObjectData::Other { .. } => Transform::identity(),
        })
    }

    fn path_segments(obj: &MemoryObject) -> Result<Vec<RawSegment>, ProviderError> {
        Ok(obj.path()?.segments.clone())
    }

    fn path_fill_color(obj: &MemoryObject) -> Result<Rgba, ProviderError> {
        Ok(obj.path()?.fill)
    }

    fn path_stroke_color(obj: &MemoryObject) -> Result<Rgba, ProviderError> {
        Ok(obj.path()?.stroke)
    }

    fn path_stroke_width(obj: &MemoryObject) -> Result<f64, ProviderError> {
        Ok(obj.path()?.width)
    }

    fn path_line_cap(obj: &MemoryObject) -> Result<i32, ProviderError> {
        Ok(obj.path()?.cap)
    }

    fn path_line_join(obj: &MemoryObject) -> Result<i32, ProviderError> {
        Ok(obj.path()?.join)
    }

    fn object_links(
        _doc: &MemoryDocument,
        page: &MemoryHandle,
    ) -> Result<Vec<RawObjLink>, ProviderError> {
        Ok(page.page.objlinks.clone())
    }

    fn web_link_count(links: &MemoryHandle) -> usize {
        links.page.weblinks.len()
    }

    fn web_link_url(links: &MemoryHandle, index: usize) -> Result<String, ProviderError> {
        Ok(links.web_link(index)?.url.clone())
    }

    fn web_link_rects(links: &MemoryHandle, index: usize) -> Result<Vec<Rectangle>, ProviderError> {
        Ok(links.web_link(index)?.rects.clone())
    }

    fn web_link_char_range(
        links: &MemoryHandle,
        index: usize,
    ) -> Result<Option<(usize, usize)>, ProviderError> {
        Ok(links.web_link(index)?.range)
    }

    fn struct_children(tree: &MemoryHandle) -> Result<Vec<MemoryStructElement>, ProviderError> {
        Ok(tree
            .page
            .structure
            .iter()
            .map(|e| MemoryStructElement(Rc::clone(e)))
            .collect())
    }

    fn struct_element_children(
        elem: &MemoryStructElement,
    ) -> Result<Vec<MemoryStructElement>, ProviderError> {
        Ok(elem
            .0
            .children
            .iter()
            .map(|e| MemoryStructElement(Rc::clone(e)))
            .collect())
    }

    fn struct_element_info(elem: &MemoryStructElement) -> Result<StructInfo, ProviderError> {
        Ok(elem.0.info.clone())
    }

    fn struct_element_attribute(
        elem: &MemoryStructElement,
        name: &str,
    ) -> Result<Option<String>, ProviderError> {
        Ok(elem
            .0
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone()))
    }
}
