//! Combining a current overlay with a template overlay.
//!
//! REPLACE adopts the template as-is. MERGE keeps the current items and
//! appends the template's, lifted in z so the whole template stacks above the
//! current layers. Both modes hand back an overlay that satisfies the model
//! invariants: unique ids, at most one dish slot, normalized rotations.

#[cfg(test)]
#[path = "merge_test.rs"]
mod merge_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factory::fresh_id_avoiding;
use crate::model::{ItemBody, ItemKind, Overlay, OverlayItem};
use crate::rotate::normalize_rotation;
use crate::zorder::ZPolicy;

/// What happens to the current layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayMode {
    Replace,
    Merge,
}

/// What happens to the current base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageMode {
    Keep,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPolicy {
    pub overlay_mode: OverlayMode,
    pub image_mode: ImageMode,
}

impl ApplyPolicy {
    /// The least destructive policy for the current state.
    ///
    /// An empty overlay has nothing to lose, so it is replaced; otherwise the
    /// template is merged in. A session without an image takes the template's.
    #[must_use]
    pub fn suggest(current: &Overlay, has_image: bool) -> Self {
        Self {
            overlay_mode: if current.is_empty() { OverlayMode::Replace } else { OverlayMode::Merge },
            image_mode: if has_image { ImageMode::Keep } else { ImageMode::Replace },
        }
    }
}

/// A template item whose id was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRemap {
    pub kind: ItemKind,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub overlay: Overlay,
    /// z added to every template item. Zero for REPLACE.
    pub z_lift: i64,
    pub remapped: Vec<IdRemap>,
    /// Pics that lost the dish-slot role because an earlier one kept it.
    pub demoted_dish_slots: Vec<String>,
}

fn adopt<B: ItemBody + Clone>(
    items: &[OverlayItem<B>],
    z_lift: i64,
    taken: &mut HashSet<String>,
    remapped: &mut Vec<IdRemap>,
) -> Vec<OverlayItem<B>> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if taken.contains(&item.base.id) {
                let to = fresh_id_avoiding(taken);
                remapped.push(IdRemap { kind: B::KIND, from: item.base.id.clone(), to: to.clone() });
                item.base.id = to;
            }
            taken.insert(item.base.id.clone());
            item.base.z = item.base.z.saturating_add(z_lift);
            item.base.rotation_deg = normalize_rotation(item.base.rotation_deg);
            item
        })
        .collect()
}

/// Combine `current` and `template` under `mode`.
///
/// Template ids that collide with an id already in the result, or repeat
/// within the template, are replaced by fresh ids and reported. Current items
/// are never renamed.
#[must_use]
pub fn merge_overlays(current: &Overlay, template: &Overlay, mode: OverlayMode, policy: &ZPolicy) -> MergeOutcome {
    let (mut overlay, z_lift) = match mode {
        OverlayMode::Replace => (Overlay::default(), 0),
        OverlayMode::Merge => (current.clone(), policy.merge_offset),
    };

    let mut taken = overlay.ids();
    let mut remapped = Vec::new();
    let texts = adopt(&template.texts, z_lift, &mut taken, &mut remapped);
    let pics = adopt(&template.pics, z_lift, &mut taken, &mut remapped);
    let rects = adopt(&template.rects, z_lift, &mut taken, &mut remapped);
    overlay.texts.extend(texts);
    overlay.pics.extend(pics);
    overlay.rects.extend(rects);

    let demoted_dish_slots = overlay.enforce_single_dish_slot();
    debug!(
        ?mode,
        z_lift,
        items = overlay.len(),
        remapped = remapped.len(),
        demoted = demoted_dish_slots.len(),
        "merged overlays"
    );
    MergeOutcome { overlay, z_lift, remapped, demoted_dish_slots }
}
