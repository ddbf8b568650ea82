//! Default item factories, id generation and per-tier layer limits.
//!
//! Every new item starts from the same baseline field set; callers then patch
//! it. Ids are random v4 UUIDs checked against the overlay they join, so a
//! fresh id never collides with one imported from a template.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

use crate::consts::{DEFAULT_MAX_PICS, DEFAULT_MAX_RECTS, DEFAULT_MAX_TEXTS};
use crate::geom::Size;
use crate::model::{
    Anchor, Fill, ItemBase, ItemKind, LayerKey, Margins, Overlay, OverlayItem, PicBody, PicItem, PicRole, RectBody,
    RectItem, TextBody, TextItem,
};
use crate::zorder::ZPolicy;

const DEFAULT_TEXT: &str = "Your text here";
const DEFAULT_RECT_SIZE: Size = Size { width: 600.0, height: 160.0 };
const DEFAULT_DISH_SLOT_SIZE: Size = Size { width: 640.0, height: 640.0 };

// =============================================================================
// IDS
// =============================================================================

/// A random id not present in `taken`.
#[must_use]
pub fn fresh_id_avoiding(taken: &HashSet<String>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken.contains(&id) {
            return id;
        }
    }
}

/// A random id not used by any item in `overlay`.
#[must_use]
pub fn fresh_id(overlay: &Overlay) -> String {
    fresh_id_avoiding(&overlay.ids())
}

// =============================================================================
// FACTORIES
// =============================================================================

fn base(id: String, align: Anchor, margins: Margins, z: i64) -> ItemBase {
    ItemBase { align, margins, z, ..ItemBase::new(id) }
}

/// A centered text layer with placeholder content.
#[must_use]
pub fn new_text(id: String, z: i64) -> TextItem {
    OverlayItem {
        base: base(id, Anchor::MiddleCenter, Margins::default(), z),
        body: TextBody { text: DEFAULT_TEXT.into(), ..TextBody::default() },
    }
}

/// A centered picture layer showing `url` at its natural `size`.
#[must_use]
pub fn new_pic(id: String, url: String, size: Size, z: i64) -> PicItem {
    let aspect_ratio = (size.width > 0.0 && size.height > 0.0).then(|| size.height / size.width);
    OverlayItem {
        base: base(id, Anchor::MiddleCenter, Margins::default(), z),
        body: PicBody { url, width: size.width, height: size.height, aspect_ratio, role: None },
    }
}

/// A dark banner along the bottom edge.
#[must_use]
pub fn new_rect(id: String, z: i64) -> RectItem {
    OverlayItem {
        base: base(id, Anchor::BottomCenter, Margins { bottom: 80.0, ..Margins::default() }, z),
        body: RectBody {
            width: DEFAULT_RECT_SIZE.width,
            height: DEFAULT_RECT_SIZE.height,
            fill: Fill::Solid("#000000".into()),
            border_radius: 12.0,
            ..RectBody::default()
        },
    }
}

/// An empty square placeholder the AI pipeline fills with the dish.
#[must_use]
pub fn new_dish_slot(id: String, z: i64) -> PicItem {
    let mut pic = new_pic(id, String::new(), DEFAULT_DISH_SLOT_SIZE, z);
    pic.base.name = "Dish".into();
    pic.body.role = Some(PicRole::DishSlot);
    pic
}

/// Add a dish slot unless one exists. Returns its key and whether it was created.
pub fn ensure_dish_slot(overlay: &mut Overlay, policy: &ZPolicy) -> (LayerKey, bool) {
    if let Some(existing) = overlay.dish_slot() {
        return (existing.key(), false);
    }
    let pic = new_dish_slot(fresh_id(overlay), policy.above(overlay.max_z()));
    let key = pic.key();
    overlay.pics.push(pic);
    (key, true)
}

// =============================================================================
// TIER LIMITS
// =============================================================================

/// Maximum number of layers of each kind the current plan allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub max_texts: usize,
    pub max_pics: usize,
    pub max_rects: usize,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self { max_texts: DEFAULT_MAX_TEXTS, max_pics: DEFAULT_MAX_PICS, max_rects: DEFAULT_MAX_RECTS }
    }
}

impl TierLimits {
    /// Most layers an overlay can hold across all kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.max_texts.saturating_add(self.max_pics).saturating_add(self.max_rects)
    }

    #[must_use]
    pub fn max_for(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Text => self.max_texts,
            ItemKind::Pic => self.max_pics,
            ItemKind::Rect => self.max_rects,
        }
    }

    /// Whether one more `kind` layer fits. Refusals are notices, not errors.
    ///
    /// # Errors
    ///
    /// Returns a [`LimitNotice`] when the overlay is already at the limit.
    pub fn check(&self, overlay: &Overlay, kind: ItemKind) -> Result<(), LimitNotice> {
        let limit = self.max_for(kind);
        if overlay.count(kind) >= limit {
            return Err(LimitNotice { kind, limit });
        }
        Ok(())
    }
}

/// Transient message shown when a layer can't be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitNotice {
    pub kind: ItemKind,
    pub limit: usize,
}

impl fmt::Display for LimitNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your plan allows up to {} {}.", self.limit, self.kind.label())
    }
}
