// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — merging, splitting, cropping, rasterising, and assembling
// documents from images.

pub mod assemble;
pub mod crop;
pub mod merge;
pub mod render;
pub mod split;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use assemble::images_to_document;
pub use crop::{clip_header_footer, split_pages_vertically};
pub use merge::{merge_documents, merge_pages};
pub use render::{rasterize, PageRenderer, PdfiumRenderer};
pub use split::{chunk_ranges, split_at, split_every, split_ranges};
