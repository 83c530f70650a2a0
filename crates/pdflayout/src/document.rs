//! Top-level document type.

use std::cell::{OnceCell, RefCell};
use std::collections::{BTreeMap, HashSet};

use pdflayout_core::{BboxCache, LayoutError, LayoutOptions};
use pdflayout_provider::PrimitiveProvider;
use tracing::{debug, trace};

use crate::util::{Lift, try_init};
use crate::{Destination, OutlineItem, Page};

/// Document information dictionary keys read by [`Document::metadata`].
pub const METADATA_TAGS: [&str; 9] = [
    "Title",
    "Author",
    "Subject",
    "Keywords",
    "Creator",
    "Producer",
    "CreationDate",
    "ModDate",
    "Trapped",
];

/// Iterator over pages of a document, loading each page on demand.
///
/// Created by [`Document::pages()`]. Pages are not retained after being
/// yielded; dropping one releases its provider handles.
pub struct PagesIter<'a, P: PrimitiveProvider> {
    doc: &'a Document<P>,
    current: usize,
    count: usize,
}

impl<'a, P: PrimitiveProvider> Iterator for PagesIter<'a, P> {
    type Item = Result<Page<'a, P>, LayoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.count {
            return None;
        }
        let result = self.doc.page(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}

impl<P: PrimitiveProvider> ExactSizeIterator for PagesIter<'_, P> {}

/// An open document.
///
/// Owns the provider's document handle and closes it when dropped. Pages
/// borrow the document, so they are always released first. The glyph box
/// repair cache is shared by every page loaded from the same document.
///
/// # Example
///
/// ```
/// use pdflayout::Document;
/// use pdflayout_provider::{MemoryChar, MemoryDocument, MemoryPage, MemoryProvider};
/// use pdflayout_core::Rectangle;
///
/// let raw = MemoryDocument::new(vec![
///     MemoryPage::new(612.0, 792.0).with_char(MemoryChar::new('A', Rectangle::new(72.0, 700.0, 80.0, 712.0))),
/// ]);
/// let doc = Document::<MemoryProvider>::new("datasheet", raw, None);
/// let page = doc.page(0).unwrap();
/// assert_eq!(page.char_count(), 1);
/// ```
pub struct Document<P: PrimitiveProvider> {
    name: String,
    raw: Option<P::Document>,
    options: LayoutOptions,
    page_count: usize,
    bbox_cache: RefCell<BboxCache>,
    metadata: OnceCell<BTreeMap<String, String>>,
}

impl<P: PrimitiveProvider> Document<P> {
    /// Wrap an open provider document.
    ///
    /// `options` defaults to [`LayoutOptions::default()`] when `None`.
    pub fn new(name: impl Into<String>, raw: P::Document, options: Option<LayoutOptions>) -> Self {
        let name = name.into();
        let page_count = P::page_count(&raw);
        debug!(name = %name, pages = page_count, "opened document");
        Self {
            name,
            raw: Some(raw),
            options: options.unwrap_or_default(),
            page_count,
            bbox_cache: RefCell::new(BboxCache::new()),
            metadata: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Load a page by 0-based index.
    ///
    /// Loading acquires the page's provider handles, reads every glyph, and
    /// runs the glyph box repair pass (unless disabled in the options).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::PageOutOfRange`] for an index past the end,
    /// or the provider's error if a handle or a required glyph query fails.
    pub fn page(&self, index: usize) -> Result<Page<'_, P>, LayoutError> {
        if index >= self.page_count {
            return Err(LayoutError::PageOutOfRange {
                index,
                count: self.page_count,
            });
        }
        Page::load(self, index)
    }

    /// Iterate over all pages, loading each on demand.
    pub fn pages(&self) -> PagesIter<'_, P> {
        PagesIter {
            doc: self,
            current: 0,
            count: self.page_count,
        }
    }

    /// Non-empty document information entries, keyed by [`METADATA_TAGS`].
    pub fn metadata(&self) -> Result<&BTreeMap<String, String>, LayoutError> {
        try_init(&self.metadata, || {
            let raw = self.raw()?;
            let mut data = BTreeMap::new();
            for tag in METADATA_TAGS {
                match P::meta_text(raw, tag).lift()? {
                    Some(value) if !value.is_empty() => {
                        data.insert(tag.to_string(), value);
                    }
                    _ => {}
                }
            }
            Ok(data)
        })
    }

    /// Whether the document is tagged PDF with a structure tree.
    pub fn is_tagged(&self) -> Result<bool, LayoutError> {
        Ok(P::is_tagged(self.raw()?))
    }

    /// The outline (table of contents), ordered by page, level, then title.
    ///
    /// Outlines often repeat a bookmark; entries with the same page and
    /// title are kept once, first occurrence wins.
    pub fn toc(&self) -> Result<Vec<OutlineItem>, LayoutError> {
        let raw = P::outline(self.raw()?).lift()?;
        let total = raw.len();
        let mut seen = HashSet::new();
        let mut items: Vec<OutlineItem> = raw
            .into_iter()
            .filter(|item| seen.insert((item.page, item.title.clone())))
            .map(|item| OutlineItem {
                level: item.level,
                title: item.title,
                page: item.page,
            })
            .collect();
        items.sort_by(|a, b| (a.page, a.level, &a.title).cmp(&(b.page, b.level, &b.title)));
        trace!(entries = total, unique = items.len(), "read outline");
        Ok(items)
    }

    /// Named destinations in catalog order.
    pub fn destinations(&self) -> Result<Vec<Destination>, LayoutError> {
        Ok(P::named_destinations(self.raw()?)
            .lift()?
            .into_iter()
            .map(|dest| Destination {
                name: dest.name,
                page: dest.page,
            })
            .collect())
    }

    /// Number of distinct glyph signatures remembered so far.
    pub fn cached_glyph_boxes(&self) -> usize {
        self.bbox_cache.borrow().len()
    }

    pub(crate) fn raw(&self) -> Result<&P::Document, LayoutError> {
        self.raw
            .as_ref()
            .ok_or(LayoutError::HandleReleased("document"))
    }

    pub(crate) fn bbox_cache(&self) -> &RefCell<BboxCache> {
        &self.bbox_cache
    }
}

impl<P: PrimitiveProvider> Drop for Document<P> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            P::close_document(raw);
            debug!(name = %self.name, "closed document");
        }
    }
}
