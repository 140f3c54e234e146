// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — loading image batches from disk and writing rendered pages.

pub mod io;

pub use io::{encode, load_images, load_images_from, save_images};
