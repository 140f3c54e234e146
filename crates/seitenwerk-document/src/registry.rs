// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document registry — owns every document created or loaded during a session
// and releases them on demand or when dropped.
//
// Callers hold `DocumentId` handles; every operation that produces a document
// registers it before returning its id. Each registered document leaves the
// registry exactly once: through `close`, `take`, `close_all`, or drop.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use lopdf::Document;
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{DocumentId, ToolkitConfig};
use tracing::{debug, info, instrument, warn};

use crate::library;
use crate::pdf::render::{self, PageRenderer, PdfiumRenderer};
use crate::pdf::{assemble, crop, merge, split, tree};

/// Session-scoped owner of documents, addressed by [`DocumentId`].
pub struct DocumentRegistry {
    config: ToolkitConfig,
    renderer: Box<dyn PageRenderer>,
    /// Insertion order is release order.
    documents: Vec<(DocumentId, Document)>,
}

impl DocumentRegistry {
    // -- Construction ---------------------------------------------------------

    /// Create a registry that renders through PDFium.
    pub fn new(config: ToolkitConfig) -> Self {
        let renderer = PdfiumRenderer::new(config.pdfium_library_dir.clone());
        Self::with_renderer(config, Box::new(renderer))
    }

    /// Create a registry with a custom page renderer.
    pub fn with_renderer(config: ToolkitConfig, renderer: Box<dyn PageRenderer>) -> Self {
        Self {
            config,
            renderer,
            documents: Vec::new(),
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    // -- Bookkeeping ----------------------------------------------------------

    /// Take ownership of a document built elsewhere.
    pub fn insert(&mut self, document: Document) -> DocumentId {
        let id = DocumentId::new();
        debug!(%id, pages = document.get_pages().len(), "Document registered");
        self.documents.push((id, document));
        id
    }

    fn insert_all(&mut self, documents: Vec<Document>) -> Vec<DocumentId> {
        documents.into_iter().map(|doc| self.insert(doc)).collect()
    }

    fn position(&self, id: DocumentId) -> Result<usize> {
        self.documents
            .iter()
            .position(|(entry, _)| *entry == id)
            .ok_or(SeitenwerkError::DocumentNotFound(id))
    }

    pub fn get(&self, id: DocumentId) -> Result<&Document> {
        let index = self.position(id)?;
        Ok(&self.documents[index].1)
    }

    fn get_mut(&mut self, id: DocumentId) -> Result<&mut Document> {
        let index = self.position(id)?;
        Ok(&mut self.documents[index].1)
    }

    fn get_many(&self, ids: &[DocumentId]) -> Result<Vec<&Document>> {
        ids.iter().map(|id| self.get(*id)).collect()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.position(id).is_ok()
    }

    pub fn page_count(&self, id: DocumentId) -> Result<usize> {
        Ok(self.get(id)?.get_pages().len())
    }

    /// Number of documents still open.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Open document ids in registration order.
    pub fn ids(&self) -> Vec<DocumentId> {
        self.documents.iter().map(|(id, _)| *id).collect()
    }

    /// Remove a document without releasing it; ownership moves to the caller.
    pub fn take(&mut self, id: DocumentId) -> Result<Document> {
        let index = self.position(id)?;
        let (_, document) = self.documents.remove(index);
        debug!(%id, "Document taken out of registry");
        Ok(document)
    }

    /// Release one document.
    pub fn close(&mut self, id: DocumentId) -> Result<()> {
        let index = self.position(id)?;
        let (_, document) = self.documents.remove(index);
        drop(document);
        debug!(%id, "Document closed");
        Ok(())
    }

    /// Release every open document, oldest first. Returns how many were
    /// released.
    pub fn close_all(&mut self) -> usize {
        let count = self.documents.len();
        for (id, document) in self.documents.drain(..) {
            drop(document);
            debug!(%id, "Document closed");
        }
        if count > 0 {
            info!(count, "Closed all documents");
        }
        count
    }

    // -- Loading and saving ---------------------------------------------------

    /// Load one PDF file. Unlike directory loading, failure is an error.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<DocumentId> {
        let path = path.as_ref();
        let document = Document::load(path).map_err(|err| {
            SeitenwerkError::Pdf(format!("failed to open {}: {}", path.display(), err))
        })?;
        info!(pages = document.get_pages().len(), "PDF opened");
        Ok(self.insert(document))
    }

    /// Load every PDF in `dir` in natural filename order, skipping failures.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Vec<DocumentId> {
        let loaded = library::load_documents(dir);
        self.insert_all(loaded.into_iter().map(|l| l.document).collect())
    }

    /// Load the PDFs among `files` in natural filename order, skipping failures.
    pub fn load_files(&mut self, files: &[PathBuf]) -> Vec<DocumentId> {
        let loaded = library::load_documents_from(files);
        self.insert_all(loaded.into_iter().map(|l| l.document).collect())
    }

    /// Serialise a document, compressing it first if configured to.
    pub fn to_bytes(&mut self, id: DocumentId) -> Result<Vec<u8>> {
        let compress = self.config.compress_output;
        tree::to_bytes(self.get_mut(id)?, compress)
    }

    /// Write a document to `path`.
    pub fn save(&mut self, id: DocumentId, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes(id)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(%id, path = %path.as_ref().display(), bytes = bytes.len(), "Wrote PDF");
        Ok(())
    }

    // -- Operations -----------------------------------------------------------

    /// Merge whole documents, in order, into a new one.
    pub fn merge(&mut self, ids: &[DocumentId]) -> Result<DocumentId> {
        let merged = merge::merge_documents(&self.get_many(ids)?, &self.config.pdf_version)?;
        Ok(self.insert(merged))
    }

    /// Build a new document from `(document, 1-indexed page)` selections.
    pub fn merge_pages(&mut self, pages: &[(DocumentId, u32)]) -> Result<DocumentId> {
        let selection = pages
            .iter()
            .map(|(id, page)| self.get(*id).map(|doc| (doc, *page)))
            .collect::<Result<Vec<_>>>()?;
        let merged = merge::merge_pages(&selection, &self.config.pdf_version)?;
        Ok(self.insert(merged))
    }

    /// Split into parts of `pages_per_part` pages.
    pub fn split(&mut self, id: DocumentId, pages_per_part: usize) -> Result<Vec<DocumentId>> {
        let parts = split::split_every(self.get(id)?, pages_per_part, &self.config.pdf_version)?;
        Ok(self.insert_all(parts))
    }

    /// Split at 0-based page indices, each starting a new part.
    pub fn split_at(&mut self, id: DocumentId, indices: &[usize]) -> Result<Vec<DocumentId>> {
        let parts = split::split_at(self.get(id)?, indices, &self.config.pdf_version)?;
        Ok(self.insert_all(parts))
    }

    /// Copy of the document with `padding` points hidden top and bottom.
    pub fn clip_header_footer(&mut self, id: DocumentId, padding: f32) -> Result<DocumentId> {
        let clipped =
            crop::clip_header_footer(self.get(id)?, padding, &self.config.pdf_version)?;
        Ok(self.insert(clipped))
    }

    /// Copy of the document with each page cut into top and bottom halves.
    pub fn split_pages_vertically(&mut self, id: DocumentId) -> Result<DocumentId> {
        let halves = crop::split_pages_vertically(self.get(id)?, &self.config.pdf_version)?;
        Ok(self.insert(halves))
    }

    /// Render every page at the configured scale.
    pub fn to_images(&mut self, id: DocumentId) -> Result<Vec<DynamicImage>> {
        let pdf = tree::to_bytes(self.get_mut(id)?, false)?;
        render::rasterize(self.renderer.as_ref(), &pdf, self.config.render_scale)
    }

    /// Build a registered document with one page per image.
    pub fn images_to_document(&mut self, images: &[DynamicImage]) -> Result<DocumentId> {
        let document = assemble::images_to_document(images, &self.config.pdf_version)?;
        Ok(self.insert(document))
    }

    /// Replace every page by a rendered picture of itself.
    pub fn to_images_document(&mut self, id: DocumentId) -> Result<DocumentId> {
        let images = self.to_images(id)?;
        self.images_to_document(&images)
    }
}

impl Drop for DocumentRegistry {
    fn drop(&mut self) {
        if !self.documents.is_empty() {
            warn!(
                open = self.documents.len(),
                "Registry dropped with open documents; closing them"
            );
            self.close_all();
        }
    }
}
