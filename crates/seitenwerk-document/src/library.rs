// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory loading — every PDF in a folder, in natural filename order.

use std::path::{Path, PathBuf};

use lopdf::Document;
use seitenwerk_core::sort_paths_naturally;
use tracing::{debug, info, instrument, warn};

/// A document together with the file it was read from.
#[derive(Debug)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: Document,
}

/// Whether a file name carries a `pdf` extension, ignoring ASCII case.
///
/// Trailing dots are ignored, so `report.pdf.` counts while `report.` and
/// `pdf` do not. A bare `.pdf` counts.
pub fn is_pdf(file_name: &str) -> bool {
    file_name
        .trim_end_matches('.')
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// Load every PDF directly inside `dir`. A path that is not a readable
/// directory yields an empty list.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn load_documents(dir: impl AsRef<Path>) -> Vec<LoadedDocument> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        debug!("Not a directory");
        return Vec::new();
    }
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            let files: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .collect();
            load_documents_from(&files)
        }
        Err(err) => {
            warn!(%err, "could not list directory");
            Vec::new()
        }
    }
}

/// Load the PDFs among `files`, in natural filename order.
///
/// Directories and files without a `.pdf` name are ignored. Files that fail
/// to parse are logged and skipped.
pub fn load_documents_from(files: &[PathBuf]) -> Vec<LoadedDocument> {
    let mut ordered = files.to_vec();
    sort_paths_naturally(&mut ordered);

    let mut documents = Vec::new();
    for path in ordered {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if path.is_dir() || !is_pdf(&name) {
            continue;
        }
        match Document::load(&path) {
            Ok(document) => {
                debug!(file = %name, pages = document.get_pages().len(), "PDF loaded");
                documents.push(LoadedDocument { path, document });
            }
            Err(err) => warn!(file = %name, %err, "could not load file"),
        }
    }
    info!(loaded = documents.len(), candidates = files.len(), "Documents loaded");
    documents
}
