// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterisation. The `PageRenderer` trait is the seam; `PdfiumRenderer`
// is the production implementation backed by a dynamically bound PDFium.

use std::path::PathBuf;

use image::DynamicImage;
use pdfium_render::prelude::*;
use seitenwerk_core::error::{Result, SeitenwerkError};
use tracing::{debug, info, instrument};

/// Turns serialised PDF bytes into one image per page.
pub trait PageRenderer {
    /// Render every page, in order, at `scale` times its size in points
    /// (1.0 = 72 DPI).
    fn render_pages(&self, pdf: &[u8], scale: f32) -> Result<Vec<DynamicImage>>;
}

/// Renderer backed by PDFium.
///
/// The library is bound on every call since PDFium is not thread-safe and
/// bindings must not outlive the document they load.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRenderer {
    library_dir: Option<PathBuf>,
}

impl PdfiumRenderer {
    /// `library_dir` is searched first, then `./`, then the system library.
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self { library_dir }
    }

    fn bind(&self) -> Result<Pdfium> {
        let preferred = self.library_dir.as_ref().map(|dir| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                &*dir.to_string_lossy(),
            ))
        });

        let bindings = match preferred {
            Some(Ok(bindings)) => Ok(bindings),
            _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|err| SeitenwerkError::Render(format!("failed to initialise PDFium: {}", err)))?;

        Ok(Pdfium::new(bindings))
    }
}

impl PageRenderer for PdfiumRenderer {
    #[instrument(skip(self, pdf), fields(bytes_len = pdf.len()))]
    fn render_pages(&self, pdf: &[u8], scale: f32) -> Result<Vec<DynamicImage>> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|err| SeitenwerkError::Render(format!("PDFium could not open PDF: {}", err)))?;

        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .render_form_data(true)
            .render_annotations(true);

        let mut images = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let bitmap = page.render_with_config(&config).map_err(|err| {
                SeitenwerkError::Render(format!("failed to render page {}: {}", index + 1, err))
            })?;
            let image = bitmap.as_image();
            debug!(page = index + 1, width = image.width(), height = image.height(), "Page rendered");
            images.push(image);
        }

        info!(pages = images.len(), scale, "Rendering complete");
        Ok(images)
    }
}

/// Render `pdf` with `renderer` after checking the scale factor.
pub fn rasterize(
    renderer: &dyn PageRenderer,
    pdf: &[u8],
    scale: f32,
) -> Result<Vec<DynamicImage>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SeitenwerkError::InvalidArgument(format!(
            "render scale must be a positive number, got {}",
            scale
        )));
    }
    renderer.render_pages(pdf, scale)
}
