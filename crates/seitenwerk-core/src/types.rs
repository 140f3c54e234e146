// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Seitenwerk PDF toolkit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SeitenwerkError};

/// Handle for a document held by a `DocumentRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A PDF rectangle in default user-space units (points, 1/72 inch).
///
/// Always normalised so that `(llx, lly)` is the lower-left corner and
/// `(urx, ury)` the upper-right one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    /// US Letter, used when a page carries neither a CropBox nor a MediaBox.
    pub const LETTER: PageBox = PageBox {
        llx: 0.0,
        lly: 0.0,
        urx: 612.0,
        ury: 792.0,
    };

    /// Build a box from two opposite corners given in any order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            llx: x1.min(x2),
            lly: y1.min(y2),
            urx: x1.max(x2),
            ury: y1.max(y2),
        }
    }

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// Trim `padding` points off both the top and the bottom edge.
    ///
    /// A negative padding grows the box. Fails when nothing of the page
    /// would remain visible.
    pub fn clip_vertical(&self, padding: f32) -> Result<PageBox> {
        let ury = self.ury - padding;
        let lly = self.lly + padding;
        if !(ury > lly) {
            return Err(SeitenwerkError::InvalidArgument(format!(
                "padding {} leaves no visible area on a page {} points high",
                padding,
                self.height()
            )));
        }
        Ok(PageBox { lly, ury, ..*self })
    }

    /// Cut the box in two along its horizontal centre line, returning the
    /// `(top, bottom)` halves.
    pub fn bisect_horizontal(&self) -> (PageBox, PageBox) {
        let split = self.ury - (self.ury - self.lly) / 2.0;
        let top = PageBox { lly: split, ..*self };
        let bottom = PageBox { ury: split, ..*self };
        (top, bottom)
    }
}

/// Encodings supported when rendered pages are written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    #[default]
    Png,
    Jpeg,
}

impl ImageEncoding {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}
