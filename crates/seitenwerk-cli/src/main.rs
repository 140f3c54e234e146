// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seitenwerk — PDF toolkit command line.
//
// Entry point. Initialises logging, resolves configuration, and dispatches
// one subcommand against a fresh document registry.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use seitenwerk_core::error::Result;
use seitenwerk_core::ToolkitConfig;

#[derive(Parser, Debug)]
#[command(name = "seitenwerk")]
#[command(version, about = "Merge, split, crop, and rasterise PDF documents")]
struct Cli {
    /// JSON config file (missing keys take their defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Rasterisation scale factor (1.0 = 72 DPI)
    #[arg(long, global = true)]
    render_scale: Option<f32>,

    /// Directory containing the PDFium shared library
    #[arg(long, global = true)]
    pdfium_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Concatenate PDFs in the order given
    Merge {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,
    },

    /// Concatenate every PDF in a directory, in natural filename order
    MergeDir {
        dir: PathBuf,
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,
    },

    /// Split into parts of N pages, written as <stem>-<n>.pdf
    Split {
        input: PathBuf,
        #[arg(short = 'n', long, default_value_t = 1)]
        pages_per_part: usize,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Split before each 0-based page index, e.g. --at 3,7
    SplitAt {
        input: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<usize>,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Hide a band of PADDING points at the top and bottom of every page
    Clip {
        input: PathBuf,
        #[arg(short, long)]
        padding: f32,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Cut every page into a top half and a bottom half
    Bisect {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render every page to an image file
    Rasterize {
        input: PathBuf,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Build a PDF with one page per image (files or directories)
    ImagesToPdf {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace every page by a rendered picture of itself
    Flatten {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the page count of each PDF
    Info {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn resolve_config(cli: &Cli) -> Result<ToolkitConfig> {
    let mut config = match &cli.config {
        Some(path) => ToolkitConfig::load(path)?,
        None => ToolkitConfig::default(),
    };
    if let Some(scale) = cli.render_scale {
        config.render_scale = scale;
    }
    if let Some(dir) = &cli.pdfium_dir {
        config.pdfium_library_dir = Some(dir.clone());
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seitenwerk=info,lopdf=error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = resolve_config(&cli).and_then(|config| commands::run(cli.command, config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("seitenwerk: {}", err);
            ExitCode::FAILURE
        }
    }
}
