//! Geometry primitives shared by layout and gestures.
//!
//! Two coordinate spaces exist. *Design space* is the canonical pixel grid of
//! the selected [`OutputFormat`]; all stored item geometry lives there.
//! *Preview space* is the on-screen canvas in CSS pixels. [`Scale`] converts
//! between them independently per axis.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either preview or design space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in either space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `pt` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

/// Per-axis factor from design space to preview space.
///
/// `x` and `y` are always finite and positive; [`Scale::new`] substitutes 1.0
/// for anything else so gesture math never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    x: f64,
    y: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Scale {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: sanitize_factor(x), y: sanitize_factor(y) }
    }

    /// Uniform scale on both axes.
    #[must_use]
    pub fn uniform(factor: f64) -> Self {
        Self::new(factor, factor)
    }

    /// Scale that maps a design canvas of `design` size onto `preview`.
    #[must_use]
    pub fn fit(preview: Size, design: Size) -> Self {
        Self::new(preview.width / design.width, preview.height / design.height)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Convert a preview-space delta into design units.
    #[must_use]
    pub fn to_design(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.x, dy / self.y)
    }

    /// Convert a design-space size into preview pixels.
    #[must_use]
    pub fn size_to_preview(&self, size: Size) -> Size {
        Size::new(size.width * self.x, size.height * self.y)
    }
}

fn sanitize_factor(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Export format; fixes the design-space resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 1080 × 1080 feed post.
    #[default]
    Square,
    /// 1080 × 1350 portrait feed post.
    Portrait,
    /// 1080 × 1920 story / reel cover.
    Story,
    /// 1200 × 628 link preview.
    Landscape,
}

impl OutputFormat {
    /// Canonical design-space size in pixels.
    #[must_use]
    pub fn design_size(self) -> Size {
        match self {
            Self::Square => Size::new(1080.0, 1080.0),
            Self::Portrait => Size::new(1080.0, 1350.0),
            Self::Story => Size::new(1080.0, 1920.0),
            Self::Landscape => Size::new(1200.0, 628.0),
        }
    }

    /// Parse the lowercase format name used on the wire and the CLI.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "square" => Some(Self::Square),
            "portrait" => Some(Self::Portrait),
            "story" => Some(Self::Story),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}
