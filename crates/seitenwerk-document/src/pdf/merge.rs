// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Merging — whole documents, or hand-picked pages from any number of
// documents, into a single new document.

use lopdf::Document;
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, info, instrument};

use crate::pdf::tree::{self, PageCopier};

/// Concatenate the pages of `documents`, in order, into a new document.
///
/// The inputs are left untouched. An empty input list yields a valid
/// document with no pages.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn merge_documents(documents: &[&Document], version: &str) -> Result<Document> {
    info!(documents = documents.len(), "Merging PDFs");

    let mut merged = tree::new_document(version);
    for (index, source) in documents.iter().enumerate() {
        let mut copier = PageCopier::new(source);
        let pages = tree::page_ids(source);
        debug!(index, pages = pages.len(), "Appending document");
        for page_id in pages {
            copier.copy_page(&mut merged, page_id)?;
        }
    }

    debug!(pages = merged.get_pages().len(), "Merge complete");
    Ok(merged)
}

/// Build a new document from selected pages.
///
/// Each entry names a source document and a 1-indexed page within it. Pages
/// appear in the order given; the same page may be listed more than once.
#[instrument(skip_all, fields(pages = pages.len()))]
pub fn merge_pages(pages: &[(&Document, u32)], version: &str) -> Result<Document> {
    info!(pages = pages.len(), "Merging pages");

    let mut merged = tree::new_document(version);
    // One copier per distinct source so shared resources are copied once.
    let mut copiers: Vec<PageCopier<'_>> = Vec::new();

    for &(source, page_number) in pages {
        let source_pages = source.get_pages();
        let page_id = *source_pages
            .get(&page_number)
            .ok_or(SeitenwerkError::PageOutOfBounds {
                page: page_number,
                total: source_pages.len(),
            })?;

        let position = copiers
            .iter()
            .position(|copier| std::ptr::eq(copier.source(), source));
        let index = match position {
            Some(index) => index,
            None => {
                copiers.push(PageCopier::new(source));
                copiers.len() - 1
            }
        };
        copiers[index].copy_page(&mut merged, page_id)?;
    }

    Ok(merged)
}
