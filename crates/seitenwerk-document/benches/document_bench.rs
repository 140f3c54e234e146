// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the page-copying operations in the
// seitenwerk-document crate, run on a synthetic 200-page document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::{Dictionary, Document, Object, Stream};

use seitenwerk_document::pdf::{merge_documents, split_at, split_pages_vertically};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A document with `pages` Letter pages sharing one font resource.
fn synthetic_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]));

    let mut kids = Vec::with_capacity(pages);
    for n in 0..pages {
        let content = format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", n + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let page_tree = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(pages as i64)),
        ("Kids", Object::Array(kids)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_page_operations(c: &mut Criterion) {
    let doc = synthetic_document(200);

    c.bench_function("merge 2x200 pages", |b| {
        b.iter(|| black_box(merge_documents(&[&doc, &doc], "1.5").unwrap()));
    });

    c.bench_function("split_at 200 pages into 5", |b| {
        b.iter(|| black_box(split_at(&doc, &[40, 80, 120, 160], "1.5").unwrap()));
    });

    c.bench_function("bisect 200 pages", |b| {
        b.iter(|| black_box(split_pages_vertically(&doc, "1.5").unwrap()));
    });
}

criterion_group!(benches, bench_page_operations);
criterion_main!(benches);
