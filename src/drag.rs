//! Move gesture: pointer deltas become margin deltas.
//!
//! The pointer delta is measured in preview pixels from the gesture start and
//! divided by the scale, so the patch is always in design units. Which margin
//! moves depends on the anchor: near edges grow with the pointer, far edges
//! shrink.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::geom::{Point, Scale};
use crate::layout::effective_layout;
use crate::model::{Anchor, HorizontalClass, ItemBase, ItemPatch, LayerKey, Margins, VerticalClass};

/// An active move gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub key: LayerKey,
    /// Anchor the margins are measured against for this session.
    pub anchor: Anchor,
    /// Pointer position at gesture start, preview pixels.
    pub start_pointer: Point,
    /// Margins at gesture start, design units.
    pub start_margins: Margins,
    pub scale: Scale,
    /// The stored anchor was unrecognized and must be rewritten to `anchor`.
    materialize_anchor: bool,
}

impl DragSession {
    /// Start dragging `base` from `pointer`.
    ///
    /// An unrecognized anchor is dragged from its fallback placement; every
    /// patch then also rewrites the anchor so the stored item matches what is
    /// drawn.
    #[must_use]
    pub fn begin(key: LayerKey, base: &ItemBase, pointer: Point, scale: Scale) -> Self {
        let (anchor, start_margins) = effective_layout(base.align, &base.margins);
        Self {
            key,
            anchor,
            start_pointer: pointer,
            start_margins,
            scale,
            materialize_anchor: base.align == Anchor::Unrecognized,
        }
    }

    /// Patch moving the item to follow `pointer`.
    #[must_use]
    pub fn update(&self, pointer: Point) -> ItemPatch {
        let (dx, dy) = self
            .scale
            .to_design(pointer.x - self.start_pointer.x, pointer.y - self.start_pointer.y);
        let m = &self.start_margins;
        let mut patch = ItemPatch::default();

        match self.anchor.vertical() {
            Some(VerticalClass::Bottom) => patch.margin_bottom = Some(m.bottom - dy),
            Some(VerticalClass::Top | VerticalClass::Middle) | None => patch.margin_top = Some(m.top + dy),
        }
        match self.anchor.horizontal() {
            Some(HorizontalClass::Right) => patch.margin_right = Some(m.right - dx),
            Some(HorizontalClass::Left | HorizontalClass::Center) | None => patch.margin_left = Some(m.left + dx),
        }

        if self.materialize_anchor {
            patch.align = Some(self.anchor);
            patch.margin_top = Some(patch.margin_top.unwrap_or(m.top));
            patch.margin_right = Some(m.right);
            patch.margin_bottom = Some(m.bottom);
            patch.margin_left = Some(patch.margin_left.unwrap_or(m.left));
        }
        patch
    }
}
