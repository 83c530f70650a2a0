//! Performance benchmarks for pdflayout.
//!
//! Benchmarks cover page loading (glyph reads plus box repair), text line
//! bucketing, area queries, and graphic clustering on synthetic pages:
//! - Text: 60 lines of 80 glyphs, every tenth glyph with a collapsed box
//! - Grid: a 40x12 table of cell rectangles plus scattered rules and images

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pdflayout::Document;
use pdflayout_core::{ClusterOptions, Point, Rectangle, Transform};
use pdflayout_provider::{MemoryChar, MemoryDocument, MemoryPage, MemoryPath, MemoryProvider};

// ---------------------------------------------------------------------------
// Page generators
// ---------------------------------------------------------------------------

fn text_page() -> MemoryPage {
    let mut page = MemoryPage::new(612.0, 792.0);
    for line in 0..60 {
        let y = 760.0 - 12.0 * f64::from(line);
        for col in 0..80 {
            let x = 20.0 + 7.0 * f64::from(col);
            let c = char::from(b'a' + (col % 26) as u8);
            let tight = Rectangle::new(x, y + 2.0, x + 6.0, y + 9.0);
            let loose = if col % 10 == 9 {
                Rectangle::new(x, y, x, y)
            } else {
                Rectangle::new(x, y, x + 7.0, y + 11.0)
            };
            page = page.with_char(
                MemoryChar::new(c, loose)
                    .with_origin(Point::new(x, y + 2.0))
                    .with_tight(tight),
            );
        }
    }
    page
}

fn grid_page() -> MemoryPage {
    let mut page = MemoryPage::new(612.0, 792.0);
    for row in 0..40 {
        for col in 0..12 {
            let x = 30.0 + 45.0 * f64::from(col);
            let y = 100.0 + 15.0 * f64::from(row);
            page = page.with_path(MemoryPath::rect(&Rectangle::new(x, y, x + 45.0, y + 15.0)));
        }
    }
    for i in 0..20 {
        let y = 720.0 + 3.0 * f64::from(i);
        page = page.with_path(MemoryPath::line(Point::new(30.0, y), Point::new(300.0, y)));
    }
    for i in 0..10 {
        let x = 30.0 + 55.0 * f64::from(i);
        page = page.with_image(
            Rectangle::new(x, 20.0, x + 40.0, 80.0),
            Transform::new(40.0, 0.0, 0.0, 60.0, x, 20.0),
        );
    }
    page
}

fn open(page: fn() -> MemoryPage) -> Document<MemoryProvider> {
    Document::new("bench", MemoryDocument::new(vec![page()]), None)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_page_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_load");

    group.bench_function("text_4800_glyphs", |b| {
        let doc = open(text_page);
        b.iter(|| {
            let page = doc.page(0).unwrap();
            black_box(page.char_count());
        });
    });

    group.finish();
}

fn bench_charlines(c: &mut Criterion) {
    let doc = open(text_page);
    let mut group = c.benchmark_group("charlines");

    group.bench_function("build", |b| {
        b.iter(|| {
            let page = doc.page(0).unwrap();
            black_box(page.charlines().count());
        });
    });

    group.bench_function("area_query", |b| {
        let page = doc.page(0).unwrap();
        let area = Rectangle::new(100.0, 300.0, 400.0, 500.0);
        b.iter(|| {
            black_box(page.chars_in_area(&area).len());
        });
    });

    group.finish();
}

fn bench_graphic_clusters(c: &mut Criterion) {
    let doc = open(grid_page);
    let mut group = c.benchmark_group("graphic_clusters");

    group.bench_function("grid_510_shapes", |b| {
        let page = doc.page(0).unwrap();
        b.iter(|| {
            let clusters = page
                .graphic_clusters(None, &ClusterOptions::default())
                .unwrap();
            black_box(clusters.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_page_load, bench_charlines, bench_graphic_clusters);
criterion_main!(benches);
