// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seitenwerk — Core types, configuration, and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod natural;
pub mod types;

pub use config::ToolkitConfig;
pub use error::{Result, SeitenwerkError};
pub use natural::{natural_cmp, sort_paths_naturally};
pub use types::*;
