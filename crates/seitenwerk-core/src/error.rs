// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Seitenwerk.

use thiserror::Error;

use crate::types::DocumentId;

/// Top-level error type for all Seitenwerk operations.
#[derive(Debug, Error)]
pub enum SeitenwerkError {
    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("page rendering failed: {0}")]
    Render(String),

    // -- Caller errors --
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid split indices {indices:?} for a {page_count} page document")]
    InvalidSplitIndices {
        indices: Vec<usize>,
        page_count: usize,
    },

    #[error("page {page} out of bounds (document has {total} pages)")]
    PageOutOfBounds { page: u32, total: usize },

    #[error("document {0} is not open in this registry")]
    DocumentNotFound(DocumentId),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SeitenwerkError>;
