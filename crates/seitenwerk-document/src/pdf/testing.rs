// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test fixtures: synthetic documents and a renderer that needs no PDFium.

use image::{DynamicImage, Rgb, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use seitenwerk_core::error::{Result, SeitenwerkError};

use crate::pdf::render::PageRenderer;
use crate::pdf::tree;

/// Build a Letter-sized document with `num_pages` pages, each showing the
/// text `<prefix>-Page-<n>`. MediaBox and Resources live on the `/Pages`
/// node so copies have to resolve inheritance.
pub fn create_test_pdf(num_pages: u32, prefix: &str) -> Document {
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

    let mut page_ids = Vec::new();
    for page_num in 0..num_pages {
        let content = format!(
            "BT /F1 12 Tf 50 700 Td ({}-Page-{}) Tj ET",
            prefix,
            page_num + 1
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
        ("Resources", Object::Reference(resources_id)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

/// Add a `/Link` annotation on page `from` whose `/Dest` targets page `to`
/// (both 1-indexed), as a table of contents does.
pub fn add_link(doc: &mut Document, from: u32, to: u32) {
    let pages = doc.get_pages();
    let (from_id, to_id) = (pages[&from], pages[&to]);
    let annot_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Link".to_vec())),
        (
            "Rect",
            Object::Array(vec![
                Object::Integer(50),
                Object::Integer(690),
                Object::Integer(150),
                Object::Integer(710),
            ]),
        ),
        (
            "Dest",
            Object::Array(vec![Object::Reference(to_id), Object::Name(b"Fit".to_vec())]),
        ),
    ]));
    doc.get_dictionary_mut(from_id)
        .unwrap()
        .set("Annots", Object::Array(vec![Object::Reference(annot_id)]));
}

/// Id of the page a page's first link annotation points at.
pub fn link_target(doc: &Document, page_number: u32) -> lopdf::ObjectId {
    let page_id = doc.get_pages()[&page_number];
    let annots = doc.get_dictionary(page_id).unwrap().get(b"Annots").unwrap();
    let annot_ref = annots.as_array().unwrap()[0].as_reference().unwrap();
    let dest = doc.get_dictionary(annot_ref).unwrap().get(b"Dest").unwrap();
    dest.as_array().unwrap()[0].as_reference().unwrap()
}

/// Serialised form of [`create_test_pdf`].
pub fn create_test_pdf_bytes(num_pages: u32, prefix: &str) -> Vec<u8> {
    let mut doc = create_test_pdf(num_pages, prefix);
    tree::to_bytes(&mut doc, false).unwrap()
}

/// The literal string shown on a fixture page (1-indexed).
pub fn page_text(doc: &Document, page_number: u32) -> String {
    let page_id = doc.get_pages()[&page_number];
    let content = doc.get_page_content(page_id).unwrap();
    let content = String::from_utf8_lossy(&content);
    let start = content.find('(').unwrap() + 1;
    let end = content.rfind(')').unwrap();
    content[start..end].to_string()
}

/// Texts of every page, in order.
pub fn all_page_texts(doc: &Document) -> Vec<String> {
    (1..=doc.get_pages().len() as u32)
        .map(|n| page_text(doc, n))
        .collect()
}

/// Renders each page as a blank white image sized from its crop box.
pub struct BlankRenderer;

impl PageRenderer for BlankRenderer {
    fn render_pages(&self, pdf: &[u8], scale: f32) -> Result<Vec<DynamicImage>> {
        let doc = Document::load_mem(pdf).map_err(|err| SeitenwerkError::Render(err.to_string()))?;
        Ok(tree::page_ids(&doc)
            .into_iter()
            .map(|page_id| {
                let page_box = tree::effective_crop_box(&doc, page_id);
                let width = (page_box.width() * scale).round() as u32;
                let height = (page_box.height() * scale).round() as u32;
                DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 255, 255])))
            })
            .collect())
    }
}
