//! Scoped ownership of a page's provider handles.

use pdflayout_core::LayoutError;
use pdflayout_provider::PrimitiveProvider;
use tracing::trace;

use crate::util::Lift;

/// The four provider handles behind one page.
///
/// Acquired page, text page, web links, structure tree, and released in the
/// reverse order when dropped. Each field is filled as soon as its handle is
/// acquired, so a failure part-way through still releases the handles that
/// were already open.
pub(crate) struct PageHandles<P: PrimitiveProvider> {
    index: usize,
    page: Option<P::Page>,
    text: Option<P::TextPage>,
    links: Option<P::WebLinks>,
    tree: Option<P::StructTree>,
}

impl<P: PrimitiveProvider> PageHandles<P> {
    pub(crate) fn acquire(doc: &P::Document, index: usize) -> Result<Self, LayoutError> {
        let mut handles = Self {
            index,
            page: None,
            text: None,
            links: None,
            tree: None,
        };
        handles.page = Some(P::load_page(doc, index).lift()?);
        handles.text = Some(P::load_text_page(handles.page()?).lift()?);
        handles.links = Some(P::load_web_links(handles.text()?).lift()?);
        handles.tree = Some(P::load_struct_tree(handles.page()?).lift()?);
        Ok(handles)
    }

    pub(crate) fn page(&self) -> Result<&P::Page, LayoutError> {
        self.page.as_ref().ok_or(LayoutError::HandleReleased("page"))
    }

    pub(crate) fn text(&self) -> Result<&P::TextPage, LayoutError> {
        self.text
            .as_ref()
            .ok_or(LayoutError::HandleReleased("text page"))
    }

    pub(crate) fn web_links(&self) -> Result<&P::WebLinks, LayoutError> {
        self.links
            .as_ref()
            .ok_or(LayoutError::HandleReleased("web links"))
    }

    pub(crate) fn struct_tree(&self) -> Result<&P::StructTree, LayoutError> {
        self.tree
            .as_ref()
            .ok_or(LayoutError::HandleReleased("structure tree"))
    }
}

impl<P: PrimitiveProvider> Drop for PageHandles<P> {
    fn drop(&mut self) {
        // Later handles may reference earlier ones.
        if let Some(tree) = self.tree.take() {
            P::close_struct_tree(tree);
        }
        if let Some(links) = self.links.take() {
            P::close_web_links(links);
        }
        if let Some(text) = self.text.take() {
            P::close_text_page(text);
        }
        if let Some(page) = self.page.take() {
            P::close_page(page);
        }
        trace!(page = self.index, "released page handles");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdflayout_provider::{
        MemoryDocument, MemoryPage, MemoryProvider, Resource, ResourceEvent, ResourceKind,
    };

    fn closes(events: &[ResourceEvent]) -> Vec<Resource> {
        events
            .iter()
            .filter_map(|e| match e {
                ResourceEvent::Close(r) => Some(*r),
                ResourceEvent::Open(_) => None,
            })
            .collect()
    }

    #[test]
    fn releases_in_reverse_order() {
        let doc = MemoryDocument::new(vec![MemoryPage::new(100.0, 100.0)]);
        let log = doc.log();
        let handles = PageHandles::<MemoryProvider>::acquire(&doc, 0).unwrap();
        assert_eq!(log.open_handles(), 5);
        drop(handles);
        assert_eq!(
            closes(&log.events()),
            vec![
                Resource::StructTree(0),
                Resource::WebLinks(0),
                Resource::TextPage(0),
                Resource::Page(0),
            ]
        );
    }

    #[test]
    fn partial_acquisition_is_released() {
        let doc = MemoryDocument::new(vec![
            MemoryPage::new(100.0, 100.0).failing(ResourceKind::StructTree),
        ]);
        let log = doc.log();
        let result = PageHandles::<MemoryProvider>::acquire(&doc, 0);
        assert!(matches!(result, Err(LayoutError::Provider(_))));
        assert_eq!(
            closes(&log.events()),
            vec![Resource::WebLinks(0), Resource::TextPage(0), Resource::Page(0)]
        );
        // Only the document itself is still open.
        assert_eq!(log.open_handles(), 1);
    }

    #[test]
    fn failed_first_handle_releases_nothing() {
        let doc = MemoryDocument::new(vec![MemoryPage::new(1.0, 1.0).failing(ResourceKind::Page)]);
        let log = doc.log();
        assert!(PageHandles::<MemoryProvider>::acquire(&doc, 0).is_err());
        assert!(closes(&log.events()).is_empty());
    }
}
