// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand handlers. Each one drives a fresh `DocumentRegistry` and closes
// it before returning.

use std::path::{Path, PathBuf};

use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::{DocumentId, ToolkitConfig};
use seitenwerk_document::raster::{load_images, save_images};
use seitenwerk_document::DocumentRegistry;
use tracing::info;

use crate::Command;

pub(crate) fn run(command: Command, config: ToolkitConfig) -> Result<()> {
    let mut registry = DocumentRegistry::new(config);
    let result = dispatch(&mut registry, command);
    registry.close_all();
    result
}

fn dispatch(registry: &mut DocumentRegistry, command: Command) -> Result<()> {
    match command {
        Command::Merge { inputs, output } => {
            let ids = inputs
                .iter()
                .map(|path| registry.open(path))
                .collect::<Result<Vec<_>>>()?;
            let merged = registry.merge(&ids)?;
            registry.save(merged, &output)
        }
        Command::MergeDir { dir, output } => {
            let ids = registry.load_directory(&dir);
            if ids.is_empty() {
                return Err(SeitenwerkError::InvalidArgument(format!(
                    "no loadable PDF files in {}",
                    dir.display()
                )));
            }
            let merged = registry.merge(&ids)?;
            registry.save(merged, &output)
        }
        Command::Split {
            input,
            pages_per_part,
            output_dir,
        } => {
            let id = registry.open(&input)?;
            let parts = registry.split(id, pages_per_part)?;
            save_parts(registry, &parts, &input, &output_dir)
        }
        Command::SplitAt {
            input,
            at,
            output_dir,
        } => {
            let id = registry.open(&input)?;
            let parts = registry.split_at(id, &at)?;
            save_parts(registry, &parts, &input, &output_dir)
        }
        Command::Clip {
            input,
            padding,
            output,
        } => {
            let id = registry.open(&input)?;
            let clipped = registry.clip_header_footer(id, padding)?;
            registry.save(clipped, &output)
        }
        Command::Bisect { input, output } => {
            let id = registry.open(&input)?;
            let halves = registry.split_pages_vertically(id)?;
            registry.save(halves, &output)
        }
        Command::Rasterize { input, output_dir } => {
            let id = registry.open(&input)?;
            let images = registry.to_images(id)?;
            let encoding = registry.config().image_encoding;
            let written = save_images(&images, &output_dir, &file_stem(&input), encoding)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::ImagesToPdf { inputs, output } => {
            let images: Vec<_> = inputs.iter().flat_map(load_images).collect();
            if images.is_empty() {
                return Err(SeitenwerkError::InvalidArgument(
                    "no loadable images among the inputs".into(),
                ));
            }
            let id = registry.images_to_document(&images)?;
            registry.save(id, &output)
        }
        Command::Flatten { input, output } => {
            let id = registry.open(&input)?;
            let flat = registry.to_images_document(id)?;
            registry.save(flat, &output)
        }
        Command::Info { inputs } => {
            for path in inputs {
                let id = registry.open(&path)?;
                println!("{}\t{}", path.display(), registry.page_count(id)?);
                registry.close(id)?;
            }
            Ok(())
        }
    }
}

/// Save each part as `<stem>-<n>.pdf` inside `dir`, numbering from 1.
fn save_parts(
    registry: &mut DocumentRegistry,
    parts: &[DocumentId],
    input: &Path,
    dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let stem = file_stem(input);
    for (index, id) in parts.iter().enumerate() {
        let path = part_path(dir, &stem, index);
        registry.save(*id, &path)?;
        println!("{}", path.display());
    }
    info!(parts = parts.len(), "Split written");
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn part_path(dir: &Path, stem: &str, index: usize) -> PathBuf {
    dir.join(format!("{}-{}.pdf", stem, index + 1))
}
