// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// seitenwerk-document — Document operations for the Seitenwerk PDF toolkit.
//
// Provides PDF operations (merge, split, crop, bisect, rasterise, assemble
// from images), image batch loading, natural-order directory loading, and
// the `DocumentRegistry` that owns every document a session creates.

pub mod library;
pub mod pdf;
pub mod raster;
pub mod registry;

// Re-export the primary items so callers can use `seitenwerk_document::DocumentRegistry` etc.
pub use library::{is_pdf, load_documents, load_documents_from, LoadedDocument};
pub use pdf::{PageRenderer, PdfiumRenderer};
pub use registry::DocumentRegistry;

// Callers need the document type to use `insert`/`take`.
pub use lopdf::Document;
