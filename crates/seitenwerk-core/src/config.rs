// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toolkit configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ImageEncoding;

/// Settings shared by every document operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Scale factor applied when rasterising pages (1.0 = 72 DPI).
    pub render_scale: f32,
    /// PDF header version for newly created documents.
    pub pdf_version: String,
    /// Encoding used when rendered pages are written to disk.
    pub image_encoding: ImageEncoding,
    /// Directory holding the PDFium shared library. Falls back to `./` and
    /// then the system library when unset.
    pub pdfium_library_dir: Option<PathBuf>,
    /// Compress object streams before saving.
    pub compress_output: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            render_scale: 4.0,
            pdf_version: "1.5".to_string(),
            image_encoding: ImageEncoding::Png,
            pdfium_library_dir: None,
            compress_output: true,
        }
    }
}

impl ToolkitConfig {
    /// Read a config from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
