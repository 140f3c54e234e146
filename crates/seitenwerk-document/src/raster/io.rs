// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image batch I/O. Loading is best-effort: a file that cannot be decoded is
// logged and skipped so the rest of the batch still loads.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{sort_paths_naturally, ImageEncoding};
use tracing::{debug, info, instrument, warn};

/// JPEG quality used for rendered pages.
const JPEG_QUALITY: u8 = 90;

/// Load the images found at `path`.
///
/// A directory contributes each of its direct entries in natural filename
/// order; any other path is treated as a single image file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_images(path: impl AsRef<Path>) -> Vec<DynamicImage> {
    let path = path.as_ref();
    if !path.is_dir() {
        return load_images_from(&[path.to_path_buf()]);
    }

    let mut entries: Vec<PathBuf> = match std::fs::read_dir(path) {
        Ok(dir) => dir.filter_map(|entry| entry.ok().map(|e| e.path())).collect(),
        Err(err) => {
            warn!(%err, "could not list image directory");
            return Vec::new();
        }
    };
    sort_paths_naturally(&mut entries);
    load_images_from(&entries)
}

/// Decode each file in order, skipping directories and anything unreadable.
pub fn load_images_from(files: &[PathBuf]) -> Vec<DynamicImage> {
    let mut images = Vec::with_capacity(files.len());
    for file in files {
        if file.is_dir() {
            continue;
        }
        match image::open(file) {
            Ok(image) => {
                debug!(
                    file = %file.display(),
                    width = image.width(),
                    height = image.height(),
                    "Image loaded"
                );
                images.push(image);
            }
            Err(err) => warn!(file = %display_name(file), %err, "could not load image"),
        }
    }
    info!(loaded = images.len(), requested = files.len(), "Image batch loaded");
    images
}

/// Encode an image into `encoding`, returning the raw bytes.
pub fn encode(image: &DynamicImage, encoding: ImageEncoding) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match encoding {
        ImageEncoding::Png => {
            let mut cursor = std::io::Cursor::new(&mut buffer);
            image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
                SeitenwerkError::Image(format!("PNG encoding failed: {}", err))
            })?;
        }
        ImageEncoding::Jpeg => {
            let rgb = image.to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            rgb.write_with_encoder(encoder).map_err(|err| {
                SeitenwerkError::Image(format!("JPEG encoding failed: {}", err))
            })?;
        }
    }
    Ok(buffer)
}

/// Write `images` to `dir` as `<stem>-1.<ext>`, `<stem>-2.<ext>`, ...
///
/// The directory is created if missing. Returns the written paths in order.
#[instrument(skip(images), fields(images = images.len(), dir = %dir.as_ref().display()))]
pub fn save_images(
    images: &[DynamicImage],
    dir: impl AsRef<Path>,
    stem: &str,
    encoding: ImageEncoding,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let path = dir.join(format!("{}-{}.{}", stem, index + 1, encoding.extension()));
        let bytes = encode(image, encoding)?;
        std::fs::write(&path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Image written");
        written.push(path);
    }
    info!(written = written.len(), "Wrote images");
    Ok(written)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
