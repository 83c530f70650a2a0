//! Integration tests for links and the structure tree.

mod common;

use common::{open, text_of, word};
use pdflayout_core::{Rectangle, WarningCode};
use pdflayout_provider::{MemoryPage, MemoryStruct, MemoryWebLink};

// --- Link annotations ---

fn linked_page() -> MemoryPage {
    MemoryPage::new(612.0, 792.0)
        .with_chars(word("Go", 100.0, 700.0))
        .with_chars(word("to", 100.0, 600.0))
        .with_object_link(Rectangle::new(95.0, 695.0, 125.0, 715.0), Some(3))
        .with_object_link(Rectangle::new(400.0, 400.0, 410.0, 410.0), None)
}

#[test]
fn objlinks_are_listed_in_page_order() {
    let (doc, _) = open(vec![linked_page()]);
    let page = doc.page(0).unwrap();
    let links = page.objlinks().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].index, 0);
    assert_eq!(links[0].dest_page, Some(3));
    assert_eq!(links[0].to_string(), "Obj(3)");
    assert_eq!(links[1].to_string(), "Obj(?)");
}

#[test]
fn objlinks_attach_to_covered_glyphs() {
    let (doc, _) = open(vec![linked_page()]);
    let page = doc.page(0).unwrap();
    assert!(page.objlink_of(page.char(0).unwrap()).is_none());

    page.link_characters().unwrap();
    let linked: Vec<&_> = page
        .chars()
        .iter()
        .filter(|c| page.objlink_of(c).is_some())
        .collect();
    assert_eq!(text_of(linked), "Go");
    assert_eq!(page.objlink_of(page.char(0).unwrap()).unwrap().dest_page, Some(3));
    assert!(page.objlink_of(page.char(2).unwrap()).is_none());
}

#[test]
fn objlinks_are_normalized_on_rotated_pages() {
    let page = MemoryPage::new(792.0, 612.0)
        .with_rotation(90)
        .with_object_link(Rectangle::new(72.0, 717.0, 80.0, 729.0), Some(0));
    let (doc, _) = open(vec![page]);
    let page = doc.page(0).unwrap();
    assert_eq!(
        page.objlinks().unwrap()[0].bbox,
        Rectangle::new(717.0, 532.0, 729.0, 540.0)
    );
}

// --- Web links ---

fn url_page() -> MemoryPage {
    MemoryPage::new(612.0, 792.0)
        .with_chars(word("a.io b", 100.0, 500.0))
        .with_web_link(
            MemoryWebLink::new("http://a.io", vec![Rectangle::new(100.0, 500.0, 140.0, 512.0)])
                .with_range(0, 4),
        )
        .with_web_link(MemoryWebLink::new("http://b.io", Vec::new()).with_range(4, 10))
        .with_web_link(MemoryWebLink::new("http://c.io", Vec::new()))
}

#[test]
fn weblinks_carry_url_rects_and_range() {
    let (doc, _) = open(vec![url_page()]);
    let page = doc.page(0).unwrap();
    let links = page.weblinks().unwrap();
    assert_eq!(links.len(), 3);
    assert_eq!(links[0].url, "http://a.io");
    assert_eq!(links[0].bboxes, [Rectangle::new(100.0, 500.0, 140.0, 512.0)]);
    assert_eq!(links[0].range, Some(0..4));
    assert_eq!(links[1].range, Some(4..14));
    assert_eq!(links[2].range, None);
    assert_eq!(links[0].to_string(), "Url(http://a.io)");
}

#[test]
fn weblinks_attach_to_their_glyph_range() {
    let (doc, _) = open(vec![url_page()]);
    let page = doc.page(0).unwrap();
    page.link_characters().unwrap();

    let urls: Vec<Option<&str>> = page
        .chars()
        .iter()
        .map(|c| page.weblink_of(c).map(|l| l.url.as_str()))
        .collect();
    assert_eq!(
        urls,
        [
            Some("http://a.io"),
            Some("http://a.io"),
            Some("http://a.io"),
            Some("http://a.io"),
            Some("http://b.io"),
            Some("http://b.io"),
        ]
    );
}

#[test]
fn range_past_the_last_glyph_warns() {
    let (doc, _) = open(vec![url_page()]);
    let page = doc.page(0).unwrap();
    page.link_characters().unwrap();
    let warnings = page.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, WarningCode::LinkRangeOutOfBounds);
    assert_eq!(warnings[0].element.as_deref(), Some("weblink 1"));
}

#[test]
fn linking_runs_once() {
    let (doc, _) = open(vec![url_page()]);
    let page = doc.page(0).unwrap();
    page.link_characters().unwrap();
    page.link_characters().unwrap();
    assert_eq!(page.warnings().len(), 1);
}

// --- Structure tree ---

fn tagged_page() -> MemoryPage {
    MemoryPage::new(612.0, 792.0).with_structure(
        MemoryStruct::new("Document")
            .with_title("Datasheet")
            .with_id("doc-1")
            .with_language("en-US")
            .with_child(
                MemoryStruct::new("Figure")
                    .with_alt_text("Block diagram")
                    .with_marked_id(7),
            )
            .with_child(
                MemoryStruct::new("Table")
                    .with_attribute("Summary", "Pin assignment")
                    .with_child(MemoryStruct::new("TR")),
            ),
    )
}

#[test]
fn structure_tree_attributes() {
    let (doc, _) = open(vec![tagged_page()]);
    let page = doc.page(0).unwrap();
    let roots = page.structures().unwrap();
    assert_eq!(roots.len(), 1);

    let root = &roots[0];
    assert_eq!(root.kind(), "Document");
    assert_eq!(root.title(), Some("Datasheet"));
    assert_eq!(root.id(), Some("doc-1"));
    assert_eq!(root.language(), Some("en-US"));

    let children = root.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].alt_text(), Some("Block diagram"));
    assert_eq!(children[0].marked_id(), Some(7));
    assert_eq!(children[0].to_string(), "S(Figure: Block diagram, 7)");
    assert_eq!(children[1].to_string(), "S(Table: , -)");
}

#[test]
fn structure_tree_describe_indents_children() {
    let (doc, _) = open(vec![tagged_page()]);
    let page = doc.page(0).unwrap();
    let roots = page.structures().unwrap();
    assert_eq!(
        roots[0].describe().unwrap(),
        "S(Document: Datasheet, doc-1)\n  S(Figure: Block diagram, 7)\n  S(Table: , -)\n    S(TR: , -)\n"
    );
}

#[test]
fn structure_string_attributes() {
    let (doc, _) = open(vec![tagged_page()]);
    let page = doc.page(0).unwrap();
    let table = &page.structures().unwrap()[0].children().unwrap()[1];
    assert_eq!(table.attribute("Summary").unwrap().as_deref(), Some("Pin assignment"));
    assert_eq!(table.attribute("Scope").unwrap(), None);
}

#[test]
fn untagged_page_has_no_structure() {
    let (doc, _) = open(vec![MemoryPage::new(612.0, 792.0)]);
    let page = doc.page(0).unwrap();
    assert!(page.structures().unwrap().is_empty());
}
