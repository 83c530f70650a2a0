//! Single page: glyphs, text lines, search, graphics, links, and structure.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use pdflayout_core::repair::is_blank;
use pdflayout_core::{
    CharLines, Cluster, ClusterOptions, LayoutError, LayoutWarning, PageFrame, Rectangle,
    RepairAction, SearchOptions, WarningCode, cluster, find_words,
};
use pdflayout_provider::{ObjectKind, PrimitiveProvider};
use tracing::{debug, trace};

use crate::handles::PageHandles;
use crate::util::{Lift, try_init};
use crate::{Character, Document, Graphic, Image, ObjLink, Path, Structure, WebLink};

/// Optional filter applied to shapes before clustering.
pub type GraphicPredicate<'f, P> = &'f dyn Fn(&Graphic<'_, P>) -> bool;

struct PageObjects<P: PrimitiveProvider> {
    paths: Vec<Path<P>>,
    images: Vec<Image<P>>,
}

/// A page loaded from a [`Document`].
///
/// Every glyph is read and its box repaired when the page loads. Text
/// lines, graphics, and links are built on first use and cached for the
/// page's lifetime. Dropping the page releases its provider handles.
pub struct Page<'d, P: PrimitiveProvider> {
    doc: &'d Document<P>,
    index: usize,
    frame: PageFrame,
    chars: Vec<Character<P>>,
    charlines: OnceCell<CharLines<usize>>,
    objects: OnceCell<PageObjects<P>>,
    objlinks: OnceCell<Vec<ObjLink>>,
    weblinks: OnceCell<Vec<WebLink>>,
    linked: Cell<bool>,
    warnings: RefCell<Vec<LayoutWarning>>,
    // Last, so the handles outlive every object read through them.
    handles: Rc<PageHandles<P>>,
}

impl<'d, P: PrimitiveProvider> Page<'d, P> {
    pub(crate) fn load(doc: &'d Document<P>, index: usize) -> Result<Self, LayoutError> {
        let handles = Rc::new(PageHandles::acquire(doc.raw()?, index)?);
        let raw = handles.page()?;
        let frame = PageFrame::new(
            P::page_width(raw),
            P::page_height(raw),
            P::page_rotation(raw),
        )?;
        let count = P::char_count(handles.text()?);
        let chars = (0..count)
            .map(|i| Character::load(&handles, frame, i))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            page = index,
            chars = count,
            rotation = frame.rotation(),
            "loaded page"
        );

        let mut page = Self {
            doc,
            index,
            frame,
            chars,
            charlines: OnceCell::new(),
            objects: OnceCell::new(),
            objlinks: OnceCell::new(),
            weblinks: OnceCell::new(),
            linked: Cell::new(false),
            warnings: RefCell::new(Vec::new()),
            handles,
        };
        if doc.options().repair_bboxes {
            page.repair_bboxes()?;
        }
        Ok(page)
    }

    /// Backfill degenerate glyph boxes from the document's repair cache.
    ///
    /// Every healthy upright glyph on the page is remembered first, so a
    /// broken glyph can be repaired from a healthy one later on the same page.
    fn repair_bboxes(&mut self) -> Result<(), LayoutError> {
        let doc = self.doc;
        let mut cache = doc.bbox_cache().borrow_mut();
        let page_rotation = self.frame.rotation();
        let mut broken = Vec::new();

        for ch in &self.chars {
            let loose = ch.loose_bbox();
            match RepairAction::classify(ch.unicode(), ch.raw_rotation(), &loose) {
                RepairAction::Remember => {
                    let signature = ch.signature()?;
                    if cache.get(&signature).is_none() {
                        trace!(key = %signature, "remembering glyph box");
                        let rotation = page_rotation + ch.raw_rotation();
                        cache.remember(signature, &loose, ch.origin()?, rotation);
                    }
                }
                RepairAction::Restore => broken.push(ch.index()),
                RepairAction::Skip => {}
            }
        }

        for index in broken {
            let ch = &self.chars[index];
            let signature = ch.signature()?;
            let rotation = page_rotation + ch.raw_rotation();
            match cache.restore(&signature, ch.origin()?, rotation) {
                Some(bbox) => self.chars[index].repair(bbox),
                None if !is_blank(ch.unicode()) => {
                    let description = ch.describe()?;
                    debug!(page = self.index, "unable to fix bbox for {description}");
                    self.warn(
                        LayoutWarning::new(
                            WarningCode::UnrepairedBbox,
                            format!("no cached box for {signature}"),
                        )
                        .with_context(self.index, format!("char {index}")),
                    );
                }
                None => {}
            }
        }
        Ok(())
    }

    fn warn(&self, warning: LayoutWarning) {
        if self.doc.options().collect_warnings {
            self.warnings.borrow_mut().push(warning);
        }
    }

    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn width(&self) -> f64 {
        self.frame.width()
    }

    pub fn height(&self) -> f64 {
        self.frame.height()
    }

    /// Intrinsic page rotation in degrees.
    pub fn rotation(&self) -> i32 {
        self.frame.rotation()
    }

    pub fn bbox(&self) -> Rectangle {
        self.frame.bbox()
    }

    /// The page's display label (e.g. `"iv"`), if the document defines one.
    pub fn label(&self) -> Result<Option<String>, LayoutError> {
        P::page_label(self.doc.raw()?, self.index).lift()
    }

    pub fn frame(&self) -> &PageFrame {
        &self.frame
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn char(&self, index: usize) -> Option<&Character<P>> {
        self.chars.get(index)
    }

    /// All glyphs in provider order.
    pub fn chars(&self) -> &[Character<P>] {
        &self.chars
    }

    /// Provider-extracted text inside a normalized area.
    pub fn text_in_area(&self, area: &Rectangle) -> Result<String, LayoutError> {
        let area = self.frame.denormalize_rect(area);
        P::bounded_text(self.handles.text()?, &area).lift()
    }

    /// Whole-word occurrences of `needle`, each as the run of glyphs that
    /// spells it, in provider order. Occurrences may overlap.
    pub fn find(&self, needle: &str, options: &SearchOptions) -> Vec<&[Character<P>]> {
        let text: Vec<Option<char>> = self
            .chars
            .iter()
            .map(|c| char::from_u32(c.unicode()))
            .collect();
        let found: Vec<&[Character<P>]> = find_words(&text, needle, options)
            .into_iter()
            .map(|range| &self.chars[range])
            .collect();
        trace!(page = self.index, needle, matches = found.len(), "searched page text");
        found
    }

    fn line_index(&self) -> &CharLines<usize> {
        self.charlines.get_or_init(|| {
            CharLines::from_midpoints(self.chars.iter().map(|c| (c.index(), c.bbox().midpoint())))
        })
    }

    /// Text lines from bottom to top, each with its glyphs left to right.
    ///
    /// Glyphs are grouped by their box midpoint rounded to 0.1 units.
    pub fn charlines(&self) -> impl Iterator<Item = (f64, Vec<&Character<P>>)> + '_ {
        self.line_index().lines().iter().map(|line| {
            let chars = line.items().iter().map(|&i| &self.chars[i]).collect();
            (line.y(), chars)
        })
    }

    /// Glyphs whose box midpoint lies inside `area`, in line order.
    pub fn chars_in_area(&self, area: &Rectangle) -> Vec<&Character<P>> {
        self.line_index()
            .in_area(area)
            .into_iter()
            .map(|&i| &self.chars[i])
            .collect()
    }

    fn objects(&self) -> Result<&PageObjects<P>, LayoutError> {
        try_init(&self.objects, || {
            let page = self.handles.page()?;
            let mut paths = Vec::new();
            let mut images = Vec::new();
            for i in 0..P::object_count(page) {
                let object = P::object(page, i).lift()?;
                match P::object_kind(&object) {
                    ObjectKind::Path => paths.push(Path::load(object, i, self.frame)?),
                    ObjectKind::Image => images.push(Image::load(object, i, self.frame)?),
                    ObjectKind::Other => {}
                }
            }
            trace!(
                page = self.index,
                paths = paths.len(),
                images = images.len(),
                "loaded page objects"
            );
            Ok(PageObjects { paths, images })
        })
    }

    /// Vector paths in page object order.
    pub fn paths(&self) -> Result<&[Path<P>], LayoutError> {
        Ok(&self.objects()?.paths)
    }

    /// Raster images in page object order.
    pub fn images(&self) -> Result<&[Image<P>], LayoutError> {
        Ok(&self.objects()?.images)
    }

    /// Group paths and images into probable tables and figures.
    ///
    /// Shapes rejected by `predicate` are left out. The overlap tolerance
    /// defaults to a fraction of the shorter page side (see
    /// [`LayoutOptions::cluster_tolerance`](pdflayout_core::LayoutOptions::cluster_tolerance)).
    /// Clusters come back top to bottom, then left to right.
    pub fn graphic_clusters(
        &self,
        predicate: Option<GraphicPredicate<'_, P>>,
        options: &ClusterOptions,
    ) -> Result<Vec<Cluster<Graphic<'_, P>>>, LayoutError> {
        let atol = options.atol.unwrap_or_else(|| {
            self.doc
                .options()
                .cluster_tolerance(self.width(), self.height())
        });
        let objects = self.objects()?;
        let shapes: Vec<Graphic<'_, P>> = objects
            .paths
            .iter()
            .map(Graphic::Path)
            .chain(objects.images.iter().map(Graphic::Image))
            .filter(|g| predicate.is_none_or(|keep| keep(g)))
            .collect();
        let clusters = cluster::graphic_clusters(&shapes, atol);
        trace!(
            page = self.index,
            shapes = shapes.len(),
            clusters = clusters.len(),
            atol,
            "clustered graphics"
        );
        Ok(clusters)
    }

    /// In-document link annotations.
    pub fn objlinks(&self) -> Result<&[ObjLink], LayoutError> {
        try_init(&self.objlinks, || {
            let raw = P::object_links(self.doc.raw()?, self.handles.page()?).lift()?;
            Ok(raw
                .into_iter()
                .enumerate()
                .map(|(index, link)| ObjLink {
                    index,
                    bbox: self.frame.normalize_rect(&link.bbox),
                    dest_page: link.dest_page,
                })
                .collect())
        })
        .map(Vec::as_slice)
    }

    /// Web links detected in the page text.
    pub fn weblinks(&self) -> Result<&[WebLink], LayoutError> {
        try_init(&self.weblinks, || {
            let links = self.handles.web_links()?;
            (0..P::web_link_count(links))
                .map(|index| {
                    let url = P::web_link_url(links, index).lift()?;
                    let bboxes = P::web_link_rects(links, index)
                        .lift()?
                        .iter()
                        .map(|r| self.frame.normalize_rect(r))
                        .collect();
                    let range = P::web_link_char_range(links, index)
                        .lift()?
                        .map(|(start, count)| start..start + count);
                    Ok(WebLink {
                        index,
                        url,
                        bboxes,
                        range,
                    })
                })
                .collect()
        })
        .map(Vec::as_slice)
    }

    /// Attach links to the glyphs they cover. Runs once per page.
    ///
    /// Link annotations only carry a rectangle, so every glyph inside it is
    /// linked. Web links name their glyph range directly; the part of a
    /// range past the last glyph is ignored with a warning.
    pub fn link_characters(&self) -> Result<(), LayoutError> {
        if self.linked.get() {
            return Ok(());
        }
        for link in self.objlinks()? {
            for ch in self.chars_in_area(&link.bbox) {
                ch.objlink.set(Some(link.index));
            }
        }
        for link in self.weblinks()? {
            let Some(range) = &link.range else {
                continue;
            };
            let end = range.end.min(self.chars.len());
            if end < range.end {
                debug!(page = self.index, "web link {} range {range:?} out of bounds", link.index);
                self.warn(
                    LayoutWarning::new(
                        WarningCode::LinkRangeOutOfBounds,
                        format!("range {range:?} exceeds {} chars", self.chars.len()),
                    )
                    .with_context(self.index, format!("weblink {}", link.index)),
                );
            }
            for ch in &self.chars[range.start.min(end)..end] {
                ch.weblink.set(Some(link.index));
            }
        }
        self.linked.set(true);
        Ok(())
    }

    /// The link annotation covering a glyph, after [`Page::link_characters`].
    pub fn objlink_of(&self, ch: &Character<P>) -> Option<&ObjLink> {
        self.objlinks.get()?.get(ch.objlink.get()?)
    }

    /// The web link spelled by a glyph, after [`Page::link_characters`].
    pub fn weblink_of(&self, ch: &Character<P>) -> Option<&WebLink> {
        self.weblinks.get()?.get(ch.weblink.get()?)
    }

    /// Root elements of the page's structure tree. Empty for untagged pages.
    pub fn structures(&self) -> Result<Vec<Structure<P>>, LayoutError> {
        P::struct_children(self.handles.struct_tree()?)
            .lift()?
            .into_iter()
            .map(Structure::load)
            .collect()
    }

    /// Warnings collected while loading and linking this page.
    pub fn warnings(&self) -> Vec<LayoutWarning> {
        self.warnings.borrow().clone()
    }
}

impl<P: PrimitiveProvider> fmt::Debug for Page<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("index", &self.index)
            .field("frame", &self.frame)
            .field("chars", &self.chars.len())
            .finish()
    }
}
