// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cropping — trim headers and footers, or cut every page into a top and a
// bottom half. Only the `/CropBox` changes; page content is never touched.

use lopdf::Document;
use seitenwerk_core::error::Result;
use tracing::{debug, info, instrument};

use crate::pdf::tree::{self, PageCopier};

/// Copy every page, hiding `padding` points at the top and at the bottom.
#[instrument(skip(document, version))]
pub fn clip_header_footer(document: &Document, padding: f32, version: &str) -> Result<Document> {
    let pages = tree::page_ids(document);
    info!(pages = pages.len(), padding, "Clipping header and footer");

    let mut output = tree::new_document(version);
    let mut copier = PageCopier::new(document);
    for page_id in pages {
        let clipped = tree::effective_crop_box(document, page_id).clip_vertical(padding)?;
        let new_page = copier.copy_page(&mut output, page_id)?;
        tree::set_crop_box(&mut output, new_page, clipped)?;
    }
    Ok(output)
}

/// Replace every page by its top half followed by its bottom half.
#[instrument(skip_all)]
pub fn split_pages_vertically(document: &Document, version: &str) -> Result<Document> {
    let pages = tree::page_ids(document);
    info!(pages = pages.len(), "Bisecting pages");

    let mut output = tree::new_document(version);
    let mut copier = PageCopier::new(document);
    for page_id in pages {
        let (top, bottom) = tree::effective_crop_box(document, page_id).bisect_horizontal();
        debug!(?top, ?bottom, "Page halves");

        let top_page = copier.copy_page(&mut output, page_id)?;
        tree::set_crop_box(&mut output, top_page, top)?;

        let bottom_page = tree::duplicate_page(&mut output, top_page)?;
        tree::set_crop_box(&mut output, bottom_page, bottom)?;
    }
    Ok(output)
}
