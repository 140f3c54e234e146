// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Splitting — cut a document into parts of a fixed page count, or at
// explicit page boundaries.

use std::ops::Range;

use lopdf::Document;
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, info, instrument};

use crate::pdf::tree;

/// Consecutive page ranges of at most `size` pages covering `page_count`
/// pages. The last range may be shorter.
pub fn chunk_ranges(page_count: usize, size: usize) -> Result<Vec<Range<usize>>> {
    if size == 0 {
        return Err(SeitenwerkError::InvalidArgument(
            "pages per part must be at least 1".to_string(),
        ));
    }
    Ok((0..page_count)
        .step_by(size)
        .map(|start| start..(start + size).min(page_count))
        .collect())
}

/// Page ranges produced by cutting before each 0-based index in `indices`.
///
/// `k` indices always give `k + 1` ranges. Indices must be non-decreasing and
/// no larger than `page_count`; repeated indices, `0`, or `page_count` itself
/// produce empty ranges.
pub fn split_ranges(page_count: usize, indices: &[usize]) -> Result<Vec<Range<usize>>> {
    let ordered = indices.windows(2).all(|pair| pair[0] <= pair[1]);
    let in_bounds = indices.iter().all(|&index| index <= page_count);
    if !ordered || !in_bounds {
        return Err(SeitenwerkError::InvalidSplitIndices {
            indices: indices.to_vec(),
            page_count,
        });
    }

    let mut bounds = Vec::with_capacity(indices.len() + 2);
    bounds.push(0);
    bounds.extend_from_slice(indices);
    bounds.push(page_count);

    Ok(bounds.windows(2).map(|pair| pair[0]..pair[1]).collect())
}

fn documents_for_ranges(
    document: &Document,
    ranges: &[Range<usize>],
    version: &str,
) -> Result<Vec<Document>> {
    let pages = tree::page_ids(document);
    ranges
        .iter()
        .map(|range| {
            debug!(start = range.start, end = range.end, "Building part");
            tree::document_from_pages(document, &pages[range.clone()], version)
        })
        .collect()
}

/// Split into parts of `pages_per_part` pages each.
#[instrument(skip(document, version))]
pub fn split_every(
    document: &Document,
    pages_per_part: usize,
    version: &str,
) -> Result<Vec<Document>> {
    let page_count = document.get_pages().len();
    let ranges = chunk_ranges(page_count, pages_per_part)?;
    info!(page_count, parts = ranges.len(), "Splitting PDF");
    documents_for_ranges(document, &ranges, version)
}

/// Split at the given 0-based page indices; each index starts a new part.
#[instrument(skip(document, version))]
pub fn split_at(document: &Document, indices: &[usize], version: &str) -> Result<Vec<Document>> {
    let page_count = document.get_pages().len();
    let ranges = split_ranges(page_count, indices)?;
    info!(page_count, parts = ranges.len(), "Splitting PDF at indices");
    documents_for_ranges(document, &ranges, version)
}
