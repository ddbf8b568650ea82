//! Layer stack: one display-ordered view over the three item collections.
//!
//! The overlay stores texts, pics and rects in separate insertion-ordered
//! vectors. The layer panel, hit-testing and reordering all want a single
//! list, top-most first. [`Overlay::layers`] builds it by sorting on `z`
//! descending; ties go to text over pic over rect, then to the later
//! insertion, so the order is total and stable.
//!
//! Reordering never shuffles vectors. It rewrites `z` through
//! [`Overlay::renumber_z`], which spaces layers by the [`ZPolicy`] step.

#[cfg(test)]
#[path = "stack_test.rs"]
mod stack_test;

use std::cmp::Reverse;

use tracing::debug;

use crate::geom::{Bounds, Point};
use crate::model::{BakeLayer, ItemKind, LayerKey, Overlay};
use crate::selection::SelectionHandle;
use crate::zorder::ZPolicy;

/// One row of the layer panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub key: LayerKey,
    /// Display label: the item name, or its text / a kind label when unnamed.
    pub label: String,
    pub z: i64,
    pub visible: bool,
    pub bake_layer: BakeLayer,
}

/// Direction for [`Overlay::move_layer`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward the top of the stack.
    Up,
    /// Toward the bottom of the stack.
    Down,
}

fn label_for(kind: ItemKind, name: &str, text: Option<&str>) -> String {
    if !name.is_empty() {
        return name.to_string();
    }
    match (kind, text) {
        (ItemKind::Text, Some(t)) if !t.is_empty() => t.to_string(),
        (ItemKind::Text, _) => "Text".into(),
        (ItemKind::Pic, _) => "Image".into(),
        (ItemKind::Rect, _) => "Shape".into(),
    }
}

impl Overlay {
    /// All items, top-most first.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerEntry> {
        let texts = self
            .texts
            .iter()
            .map(|i| (&i.base, ItemKind::Text, label_for(ItemKind::Text, &i.base.name, Some(&i.body.text))));
        let pics = self
            .pics
            .iter()
            .map(|i| (&i.base, ItemKind::Pic, label_for(ItemKind::Pic, &i.base.name, None)));
        let rects = self
            .rects
            .iter()
            .map(|i| (&i.base, ItemKind::Rect, label_for(ItemKind::Rect, &i.base.name, None)));

        let mut rows: Vec<(usize, LayerEntry)> = texts
            .chain(pics)
            .chain(rects)
            .enumerate()
            .map(|(order, (base, kind, label))| {
                let entry = LayerEntry {
                    key: LayerKey::new(kind, base.id.clone()),
                    label,
                    z: base.z,
                    visible: base.is_visible(),
                    bake_layer: base.bake_layer,
                };
                (order, entry)
            })
            .collect();

        rows.sort_by_key(|(order, e)| (Reverse(e.z), e.key.kind, Reverse(*order)));
        rows.into_iter().map(|(_, e)| e).collect()
    }

    /// Keys in display order, top-most first.
    #[must_use]
    pub fn layer_keys(&self) -> Vec<LayerKey> {
        self.layers().into_iter().map(|e| e.key).collect()
    }

    /// Assign evenly spaced z values following `order_top_to_bottom`.
    ///
    /// The last key gets `policy.base`, each one above it `policy.step` more.
    /// Keys not present in the overlay are skipped; items not listed keep
    /// their z. Renumbering the order returned by [`Overlay::layer_keys`] is
    /// idempotent.
    pub fn renumber_z(&mut self, order_top_to_bottom: &[LayerKey], policy: &ZPolicy) {
        let mut slot = 0;
        for key in order_top_to_bottom.iter().rev() {
            if let Some(base) = self.base_mut(key) {
                base.z = policy.slot(slot);
                slot += 1;
            }
        }
        debug!(layers = slot, "renumbered z");
    }

    /// Swap `key` with its neighbour in display order, then renumber.
    ///
    /// Returns `false` if the key is missing or already at that end.
    pub fn move_layer(&mut self, key: &LayerKey, direction: MoveDirection, policy: &ZPolicy) -> bool {
        let mut order = self.layer_keys();
        let Some(pos) = order.iter().position(|k| k == key) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if pos > 0 => pos - 1,
            MoveDirection::Down if pos + 1 < order.len() => pos + 1,
            _ => return false,
        };
        order.swap(pos, target);
        self.renumber_z(&order, policy);
        debug!(id = %key.id, ?direction, "moved layer");
        true
    }

    /// Flip visibility. Absent counts as visible, so the first toggle hides.
    ///
    /// Returns the new visibility, or `None` if the key is missing.
    pub fn toggle_visible(&mut self, key: &LayerKey) -> Option<bool> {
        let base = self.base_mut(key)?;
        let visible = !base.is_visible();
        base.visible = Some(visible);
        Some(visible)
    }

    /// Flip between FRONT and BAKED. Returns the new value.
    pub fn toggle_bake_layer(&mut self, key: &LayerKey) -> Option<BakeLayer> {
        let base = self.base_mut(key)?;
        base.bake_layer = base.bake_layer.toggled();
        Some(base.bake_layer)
    }

    /// Remove `key` and drop it from the selection if it was selected.
    pub fn delete_layer(&mut self, key: &LayerKey, selection: &SelectionHandle) -> bool {
        if !self.remove(key) {
            return false;
        }
        selection.clear_if(key);
        debug!(id = %key.id, kind = ?key.kind, "deleted layer");
        true
    }

    /// The top-most visible layer whose box contains `point`.
    ///
    /// `bounds_of` supplies each layer's preview-space box as measured by the
    /// host; layers it returns `None` for are skipped.
    pub fn topmost_at<F>(&self, point: Point, bounds_of: F) -> Option<LayerKey>
    where
        F: Fn(&LayerKey) -> Option<Bounds>,
    {
        self.layers()
            .into_iter()
            .filter(|e| e.visible)
            .find(|e| bounds_of(&e.key).is_some_and(|b| b.contains(point)))
            .map(|e| e.key)
    }
}
