// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image list to document, using `printpdf` 0.8 for page construction and
// handing the result back to `lopdf` so it can be merged, split, and cropped
// like any loaded document.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::DynamicImage;
use lopdf::Document;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, info, instrument, warn};

use crate::pdf::tree;

/// At 72 DPI one image pixel maps onto one PDF point.
const POINTS_DPI: f32 = 72.0;

fn points_to_mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

/// Build a document holding one page per image.
///
/// Each page is exactly as large as its image, in points, and shows the image
/// unscaled from the lower-left corner. Pixels are stored as RGB; an alpha
/// channel is dropped.
#[instrument(skip(images), fields(images = images.len()))]
pub fn images_to_document(images: &[DynamicImage], version: &str) -> Result<Document> {
    if images.is_empty() {
        debug!("No images; returning empty document");
        return Ok(tree::new_document(version));
    }

    info!(images = images.len(), "Assembling images into PDF");

    let mut doc = PdfDocument::new("Seitenwerk");
    let mut pages = Vec::with_capacity(images.len());

    for image in images {
        let width = image.width() as usize;
        let height = image.height() as usize;
        if width == 0 || height == 0 {
            return Err(SeitenwerkError::Image(format!(
                "cannot place an empty {}x{} image on a page",
                width, height
            )));
        }

        let raw = RawImage {
            pixels: RawImageData::U8(image.to_rgb8().into_raw()),
            width,
            height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(POINTS_DPI),
                rotate: None,
            },
        }];

        pages.push(PdfPage::new(
            points_to_mm(width as f32),
            points_to_mm(height as f32),
            ops,
        ));
    }

    doc.with_pages(pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        warn!(?warning, "printpdf reported a warning");
    }

    let mut document = Document::load_mem(&bytes).map_err(|err| {
        SeitenwerkError::Pdf(format!("failed to reload assembled PDF: {}", err))
    })?;
    document.version = version.to_string();

    debug!(pages = document.get_pages().len(), bytes = bytes.len(), "Assembly complete");
    Ok(document)
}
