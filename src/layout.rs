//! Anchor layout: from anchor + design-space margins to a preview placement.
//!
//! An item never stores an absolute position. Its anchor picks which edges
//! the margins are measured from, and the current [`Scale`] turns those
//! margins into preview pixels. On a center axis the item is pinned at 50%
//! and both opposing margins bias it: `shift = (near - far) * scale`.
//!
//! Everything here is pure. The renderer calls [`resolve`] on every frame and
//! the drag gesture relies on [`recover_margins`] being its exact inverse.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::Serialize;

use crate::consts::FALLBACK_MARGIN;
use crate::geom::{Bounds, Scale, Size};
use crate::model::{Anchor, HorizontalClass, Margins, VerticalClass};

/// Placement along one axis, in preview pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisPlacement {
    /// Offset from the top or left edge.
    Start(f64),
    /// Offset from the bottom or right edge.
    End(f64),
    /// Pinned at 50% and shifted by `shift` pixels.
    Center { shift: f64 },
}

/// Where an item is drawn inside the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub vertical: AxisPlacement,
    pub horizontal: AxisPlacement,
}

/// CSS positioning properties for an absolutely positioned element.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CssPlacement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// The anchor and margins actually used for layout.
///
/// Recognized anchors pass through. An unrecognized anchor is laid out
/// top-left with [`FALLBACK_MARGIN`] on every side, ignoring stored margins.
#[must_use]
pub fn effective_layout(anchor: Anchor, margins: &Margins) -> (Anchor, Margins) {
    match anchor {
        Anchor::Unrecognized => (Anchor::TopLeft, Margins::uniform(FALLBACK_MARGIN)),
        known => (known, *margins),
    }
}

/// Resolve an anchor and design-space margins into a preview placement.
#[must_use]
pub fn resolve(anchor: Anchor, margins: &Margins, scale: Scale) -> Placement {
    let (anchor, m) = effective_layout(anchor, margins);
    let vertical = match anchor.vertical() {
        Some(VerticalClass::Bottom) => AxisPlacement::End(m.bottom * scale.y()),
        Some(VerticalClass::Middle) => AxisPlacement::Center { shift: (m.top - m.bottom) * scale.y() },
        Some(VerticalClass::Top) | None => AxisPlacement::Start(m.top * scale.y()),
    };
    let horizontal = match anchor.horizontal() {
        Some(HorizontalClass::Right) => AxisPlacement::End(m.right * scale.x()),
        Some(HorizontalClass::Center) => AxisPlacement::Center { shift: (m.left - m.right) * scale.x() },
        Some(HorizontalClass::Left) | None => AxisPlacement::Start(m.left * scale.x()),
    };
    Placement { vertical, horizontal }
}

/// Invert [`resolve`]: recover design-space margins from a placement.
///
/// A placement only determines the margins its anchor uses (one per
/// start/end axis, the difference of the pair on a center axis). The rest are
/// taken from `known`; on a center axis the far margin is kept and the near
/// margin solved for.
#[must_use]
pub fn recover_margins(anchor: Anchor, placement: &Placement, scale: Scale, known: &Margins) -> Margins {
    let (_, mut m) = effective_layout(anchor, known);
    match placement.vertical {
        AxisPlacement::Start(v) => m.top = v / scale.y(),
        AxisPlacement::End(v) => m.bottom = v / scale.y(),
        AxisPlacement::Center { shift } => m.top = m.bottom + shift / scale.y(),
    }
    match placement.horizontal {
        AxisPlacement::Start(v) => m.left = v / scale.x(),
        AxisPlacement::End(v) => m.right = v / scale.x(),
        AxisPlacement::Center { shift } => m.left = m.right + shift / scale.x(),
    }
    m
}

fn px(v: f64) -> String {
    // `+ 0.0` folds -0.0 into 0.0 so it never prints as "-0px".
    format!("{}px", v + 0.0)
}

impl Placement {
    /// CSS properties for this placement.
    #[must_use]
    pub fn to_css(&self) -> CssPlacement {
        let mut css = CssPlacement::default();
        let (mut tx, mut ty, mut dx, mut dy) = ("0", "0", 0.0, 0.0);
        let mut centered = false;

        match self.vertical {
            AxisPlacement::Start(v) => css.top = Some(px(v)),
            AxisPlacement::End(v) => css.bottom = Some(px(v)),
            AxisPlacement::Center { shift } => {
                css.top = Some("50%".into());
                ty = "-50%";
                dy = shift;
                centered = true;
            }
        }
        match self.horizontal {
            AxisPlacement::Start(v) => css.left = Some(px(v)),
            AxisPlacement::End(v) => css.right = Some(px(v)),
            AxisPlacement::Center { shift } => {
                css.left = Some("50%".into());
                tx = "-50%";
                dx = shift;
                centered = true;
            }
        }
        if centered {
            css.transform = Some(format!("translate({tx},{ty}) translate({},{})", px(dx), px(dy)));
        }
        css
    }

    /// Preview-space box of an item of `item` size inside a `container`.
    #[must_use]
    pub fn bounds(&self, container: Size, item: Size) -> Bounds {
        let y = axis_origin(self.vertical, container.height, item.height);
        let x = axis_origin(self.horizontal, container.width, item.width);
        Bounds::new(x, y, item.width, item.height)
    }
}

fn axis_origin(axis: AxisPlacement, container: f64, extent: f64) -> f64 {
    match axis {
        AxisPlacement::Start(v) => v,
        AxisPlacement::End(v) => container - v - extent,
        AxisPlacement::Center { shift } => (container - extent) / 2.0 + shift,
    }
}
