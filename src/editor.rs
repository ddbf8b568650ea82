//! Host-facing editor engine.
//!
//! `EditorCore` owns the overlay, the viewport scale, the selection and the
//! active gesture. The host forwards pointer events and panel commands; each
//! call mutates the overlay synchronously and returns the [`Action`]s the host
//! should reflect (persist a patch, move the selection highlight, show a
//! notice, re-render). No method performs I/O.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::debug;

use crate::drag::DragSession;
use crate::factory::{TierLimits, ensure_dish_slot, fresh_id, new_pic, new_rect, new_text};
use crate::geom::{Bounds, OutputFormat, Point, Scale, Size};
use crate::gesture::{Gesture, Hit, HitPart, Modifiers};
use crate::layout::{CssPlacement, Placement, resolve};
use crate::model::{ItemKind, ItemPatch, LayerKey, Overlay};
use crate::resize::ResizeSession;
use crate::rotate::RotateSession;
use crate::selection::SelectionHandle;
use crate::stack::{LayerEntry, MoveDirection};
use crate::zorder::ZPolicy;

/// Actions returned from editor calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ItemCreated(LayerKey),
    ItemUpdated { key: LayerKey, patch: ItemPatch },
    ItemDeleted(LayerKey),
    SelectionChanged(Option<LayerKey>),
    /// z values of several layers changed at once.
    LayersReordered,
    /// Transient, non-blocking message for the user.
    Notice(String),
    RenderNeeded,
}

pub struct EditorCore {
    pub overlay: Overlay,
    pub selection: SelectionHandle,
    pub gesture: Gesture,
    /// Text layer whose content is being edited in place. Not draggable.
    pub text_editing: Option<LayerKey>,
    pub limits: TierLimits,
    pub z_policy: ZPolicy,
    format: OutputFormat,
    preview_size: Size,
    scale: Scale,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(Overlay::default(), OutputFormat::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(overlay: Overlay, format: OutputFormat) -> Self {
        let design = format.design_size();
        Self {
            overlay,
            selection: SelectionHandle::new(),
            gesture: Gesture::Idle,
            text_editing: None,
            limits: TierLimits::default(),
            z_policy: ZPolicy::default(),
            format,
            preview_size: design,
            scale: Scale::uniform(1.0),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: TierLimits, z_policy: ZPolicy) -> Self {
        self.limits = limits;
        self.z_policy = z_policy;
        self
    }

    // --- Viewport ---

    /// Update the preview surface size and recompute the scale. Ends any
    /// active gesture.
    pub fn set_viewport(&mut self, preview: Size) -> Vec<Action> {
        self.preview_size = preview;
        self.rescale();
        vec![Action::RenderNeeded]
    }

    /// Switch output format. Margins stay in design units; only the scale changes.
    pub fn set_format(&mut self, format: OutputFormat) -> Vec<Action> {
        self.format = format;
        self.rescale();
        vec![Action::RenderNeeded]
    }

    /// Sessions capture the scale at pointer-down, so a rescale ends the
    /// active gesture; moves already applied stay.
    fn rescale(&mut self) {
        if !self.gesture.is_idle() {
            debug!(gesture = self.gesture.name(), "gesture ended by rescale");
            self.gesture = Gesture::Idle;
        }
        self.scale = Scale::fit(self.preview_size, self.format.design_size());
        debug!(scale_x = self.scale.x(), scale_y = self.scale.y(), "viewport rescaled");
    }

    #[must_use]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[must_use]
    pub fn preview_size(&self) -> Size {
        self.preview_size
    }

    // --- Layout queries ---

    /// Preview-space placement of an item.
    #[must_use]
    pub fn placement(&self, key: &LayerKey) -> Option<Placement> {
        let base = self.overlay.base(key)?;
        Some(resolve(base.align, &base.margins, self.scale))
    }

    #[must_use]
    pub fn css(&self, key: &LayerKey) -> Option<CssPlacement> {
        self.placement(key).map(|p| p.to_css())
    }

    /// Preview-space box of a pic or rect. Text boxes are measured by the host.
    #[must_use]
    pub fn bounds(&self, key: &LayerKey) -> Option<Bounds> {
        let size = self.overlay.size_of(key)?;
        let placement = self.placement(key)?;
        Some(placement.bounds(self.preview_size, self.scale.size_to_preview(size)))
    }

    #[must_use]
    pub fn layers(&self) -> Vec<LayerEntry> {
        self.overlay.layers()
    }

    /// Top-most visible layer under `point`, using host measurements for text.
    pub fn hit_test<F>(&self, point: Point, text_bounds: F) -> Option<LayerKey>
    where
        F: Fn(&LayerKey) -> Option<Bounds>,
    {
        self.overlay.topmost_at(point, |key| match key.kind {
            ItemKind::Text => text_bounds(key),
            ItemKind::Pic | ItemKind::Rect => self.bounds(key),
        })
    }

    // --- Selection ---

    pub fn select(&mut self, key: Option<LayerKey>) -> Vec<Action> {
        let key = key.filter(|k| self.overlay.contains(k));
        if self.text_editing.is_some() && self.text_editing != key {
            self.text_editing = None;
        }
        if self.selection.set(key.clone()) { vec![Action::SelectionChanged(key)] } else { Vec::new() }
    }

    // --- Pointer input ---

    /// Pointer went down on `hit` (or on empty canvas when `None`).
    pub fn on_pointer_down(&mut self, hit: Option<Hit>, pointer: Point, _mods: Modifiers) -> Vec<Action> {
        self.gesture = Gesture::Idle;
        let Some(hit) = hit else {
            return self.select(None);
        };
        if !self.overlay.contains(&hit.key) {
            return Vec::new();
        }
        let actions = self.select(Some(hit.key.clone()));
        self.gesture = self.begin_gesture(&hit, pointer);
        if let Some(key) = self.gesture.key() {
            debug!(gesture = self.gesture.name(), id = %key.id, "gesture begin");
        }
        actions
    }

    fn begin_gesture(&mut self, hit: &Hit, pointer: Point) -> Gesture {
        let key = hit.key.clone();
        match (hit.part, key.kind) {
            (HitPart::RotateHandle, _) => match self.overlay.base(&key) {
                Some(base) => Gesture::Rotating(RotateSession::begin(key, base.rotation_deg, hit.bounds.center(), pointer)),
                None => Gesture::Idle,
            },
            (HitPart::ResizeHandle, ItemKind::Pic) => {
                let Some(pic) = self.overlay.pics.iter_mut().find(|p| p.base.id == key.id) else {
                    return Gesture::Idle;
                };
                // Pin the ratio so repeated resizes don't drift through rounding.
                pic.body.aspect_ratio = Some(pic.body.effective_aspect_ratio());
                Gesture::Resizing(ResizeSession::begin_pic(key, &pic.base, &pic.body, pointer, self.scale))
            }
            (HitPart::ResizeHandle, ItemKind::Rect) => match self.overlay.rects.iter().find(|r| r.base.id == key.id) {
                Some(rect) => Gesture::Resizing(ResizeSession::begin_rect(key, &rect.base, &rect.body, pointer, self.scale)),
                None => Gesture::Idle,
            },
            (HitPart::Body | HitPart::ResizeHandle, _) => {
                if self.text_editing.as_ref() == Some(&key) {
                    return Gesture::Idle;
                }
                match self.overlay.base(&key) {
                    Some(base) => Gesture::Dragging(DragSession::begin(key, base, pointer, self.scale)),
                    None => Gesture::Idle,
                }
            }
        }
    }

    /// Pointer moved. Shift snaps rotation.
    pub fn on_pointer_move(&mut self, pointer: Point, mods: Modifiers) -> Vec<Action> {
        let Some((key, patch)) = self.gesture.update(pointer, mods) else {
            return Vec::new();
        };
        if !self.overlay.apply_patch(&key, &patch) {
            debug!(id = %key.id, "gesture target vanished");
            self.gesture = Gesture::Idle;
            return Vec::new();
        }
        vec![Action::ItemUpdated { key, patch }, Action::RenderNeeded]
    }

    /// Pointer released. Applies the final position and ends the gesture.
    pub fn on_pointer_up(&mut self, pointer: Point, mods: Modifiers) -> Vec<Action> {
        if self.gesture.is_idle() {
            return Vec::new();
        }
        let actions = self.on_pointer_move(pointer, mods);
        debug!(gesture = self.gesture.name(), "gesture end");
        self.gesture = Gesture::Idle;
        actions
    }

    // --- Text editing ---

    /// Enter in-place text editing. Only text layers qualify.
    pub fn begin_text_edit(&mut self, key: &LayerKey) -> Vec<Action> {
        if key.kind != ItemKind::Text || !self.overlay.contains(key) {
            return Vec::new();
        }
        if self.gesture.key() == Some(key) {
            self.gesture = Gesture::Idle;
        }
        let actions = self.select(Some(key.clone()));
        self.text_editing = Some(key.clone());
        actions
    }

    /// Commit the edited text and leave editing mode.
    pub fn end_text_edit(&mut self, text: &str) -> Vec<Action> {
        let Some(key) = self.text_editing.take() else {
            return Vec::new();
        };
        self.update_item(&key, ItemPatch { text: Some(text.to_string()), ..ItemPatch::default() })
    }

    // --- Item commands ---

    /// Apply a property-panel edit.
    pub fn update_item(&mut self, key: &LayerKey, patch: ItemPatch) -> Vec<Action> {
        if patch.is_empty() || !self.overlay.apply_patch(key, &patch) {
            return Vec::new();
        }
        vec![Action::ItemUpdated { key: key.clone(), patch }, Action::RenderNeeded]
    }

    fn created(&mut self, key: LayerKey) -> Vec<Action> {
        debug!(id = %key.id, kind = ?key.kind, "layer added");
        let mut actions = vec![Action::ItemCreated(key.clone())];
        actions.extend(self.select(Some(key)));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn refuse(&self, kind: ItemKind) -> Option<Vec<Action>> {
        match self.limits.check(&self.overlay, kind) {
            Ok(()) => None,
            Err(notice) => {
                debug!(kind = ?kind, limit = notice.limit, "layer limit reached");
                Some(vec![Action::Notice(notice.to_string())])
            }
        }
    }

    pub fn add_text(&mut self) -> Vec<Action> {
        if let Some(refused) = self.refuse(ItemKind::Text) {
            return refused;
        }
        let item = new_text(fresh_id(&self.overlay), self.z_policy.above(self.overlay.max_z()));
        let key = item.key();
        self.overlay.texts.push(item);
        self.created(key)
    }

    /// Add a picture at its natural `size` in design units.
    pub fn add_pic(&mut self, url: String, size: Size) -> Vec<Action> {
        if let Some(refused) = self.refuse(ItemKind::Pic) {
            return refused;
        }
        let item = new_pic(fresh_id(&self.overlay), url, size, self.z_policy.above(self.overlay.max_z()));
        let key = item.key();
        self.overlay.pics.push(item);
        self.created(key)
    }

    pub fn add_rect(&mut self) -> Vec<Action> {
        if let Some(refused) = self.refuse(ItemKind::Rect) {
            return refused;
        }
        let item = new_rect(fresh_id(&self.overlay), self.z_policy.above(self.overlay.max_z()));
        let key = item.key();
        self.overlay.rects.push(item);
        self.created(key)
    }

    /// Add the dish slot, or select it if the overlay already has one.
    pub fn add_dish_slot(&mut self) -> Vec<Action> {
        if let Some(existing) = self.overlay.dish_slot() {
            let key = existing.key();
            return self.select(Some(key));
        }
        if let Some(refused) = self.refuse(ItemKind::Pic) {
            return refused;
        }
        let (key, _) = ensure_dish_slot(&mut self.overlay, &self.z_policy);
        self.created(key)
    }

    pub fn delete(&mut self, key: &LayerKey) -> Vec<Action> {
        let was_selected = self.selection.is(key);
        if self.gesture.key() == Some(key) {
            self.gesture = Gesture::Idle;
        }
        if self.text_editing.as_ref() == Some(key) {
            self.text_editing = None;
        }
        if !self.overlay.delete_layer(key, &self.selection) {
            return Vec::new();
        }
        let mut actions = vec![Action::ItemDeleted(key.clone())];
        if was_selected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.selection.get() {
            Some(key) => self.delete(&key),
            None => Vec::new(),
        }
    }

    pub fn move_layer(&mut self, key: &LayerKey, direction: MoveDirection) -> Vec<Action> {
        if self.overlay.move_layer(key, direction, &self.z_policy) {
            vec![Action::LayersReordered, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn toggle_visible(&mut self, key: &LayerKey) -> Vec<Action> {
        match self.overlay.toggle_visible(key) {
            Some(visible) => vec![
                Action::ItemUpdated { key: key.clone(), patch: ItemPatch { visible: Some(visible), ..ItemPatch::default() } },
                Action::RenderNeeded,
            ],
            None => Vec::new(),
        }
    }

    pub fn toggle_bake_layer(&mut self, key: &LayerKey) -> Vec<Action> {
        match self.overlay.toggle_bake_layer(key) {
            Some(layer) => vec![Action::ItemUpdated {
                key: key.clone(),
                patch: ItemPatch { bake_layer: Some(layer), ..ItemPatch::default() },
            }],
            None => Vec::new(),
        }
    }

    /// Replace the whole overlay, e.g. after a template apply.
    pub fn load(&mut self, overlay: Overlay) -> Vec<Action> {
        self.overlay = overlay;
        self.gesture = Gesture::Idle;
        self.text_editing = None;
        let mut actions = self.select(None);
        actions.push(Action::RenderNeeded);
        actions
    }
}
