//! Overlay model: layer kinds, their properties, sparse patches, and the overlay itself.
//!
//! This module defines the data that describes what is drawn over the base
//! photo (`OverlayItem`, `Overlay`), a sparse-update type for incremental
//! edits (`ItemPatch`), and the identity used by selection and the layer
//! stack (`LayerKey`).
//!
//! The serde shapes here are the exchange format consumed by the persistence
//! and render services: three arrays (`texts`, `pics`, `rects`) of flat
//! camelCase objects in design-space pixels. Missing optional fields resolve
//! to defaults instead of failing, so templates authored elsewhere load.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geom::Size;
use crate::layout::effective_layout;
use crate::rotate::normalize_rotation;

// =============================================================================
// ANCHOR
// =============================================================================

/// One of nine reference positions an item is laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Any value not listed above. Laid out top-left with fixed margins.
    #[serde(other)]
    Unrecognized,
}

/// Vertical class of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalClass {
    Top,
    Middle,
    Bottom,
}

/// Horizontal class of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalClass {
    Left,
    Center,
    Right,
}

impl Anchor {
    /// All nine recognized anchors.
    pub const ALL: [Anchor; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleCenter,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Parse the kebab-case wire name. Unknown names yield [`Anchor::Unrecognized`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "top-left" => Self::TopLeft,
            "top-center" => Self::TopCenter,
            "top-right" => Self::TopRight,
            "middle-left" => Self::MiddleLeft,
            "middle-center" => Self::MiddleCenter,
            "middle-right" => Self::MiddleRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-center" => Self::BottomCenter,
            "bottom-right" => Self::BottomRight,
            _ => Self::Unrecognized,
        }
    }

    /// Vertical class, or `None` for an unrecognized anchor.
    #[must_use]
    pub fn vertical(self) -> Option<VerticalClass> {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Some(VerticalClass::Top),
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => Some(VerticalClass::Middle),
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Some(VerticalClass::Bottom),
            Self::Unrecognized => None,
        }
    }

    /// Horizontal class, or `None` for an unrecognized anchor.
    #[must_use]
    pub fn horizontal(self) -> Option<HorizontalClass> {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Some(HorizontalClass::Left),
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => Some(HorizontalClass::Center),
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Some(HorizontalClass::Right),
            Self::Unrecognized => None,
        }
    }
}

// =============================================================================
// SHARED FIELDS
// =============================================================================

/// Signed offsets from the edges implied by an item's anchor, in design pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    #[serde(rename = "marginTop", default)]
    pub top: f64,
    #[serde(rename = "marginRight", default)]
    pub right: f64,
    #[serde(rename = "marginBottom", default)]
    pub bottom: f64,
    #[serde(rename = "marginLeft", default)]
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same margin on all four sides.
    #[must_use]
    pub fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Which side of an AI-inserted subject the server compositor puts a layer on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BakeLayer {
    /// Drawn in front of the subject.
    #[default]
    Front,
    /// Merged into the base raster behind the subject.
    Baked,
}

impl BakeLayer {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Baked,
            Self::Baked => Self::Front,
        }
    }
}

/// The kind of an overlay item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Pic,
    Rect,
}

impl ItemKind {
    /// Plural label used in user-facing notices.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text layers",
            Self::Pic => "image layers",
            Self::Rect => "shape layers",
        }
    }
}

/// Identity of an item across all three collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerKey {
    pub kind: ItemKind,
    pub id: String,
}

impl LayerKey {
    #[must_use]
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// Fields every overlay item carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub align: Anchor,
    #[serde(flatten)]
    pub margins: Margins,
    /// Clockwise rotation in degrees, kept in (-180, 180].
    #[serde(default)]
    pub rotation_deg: f64,
    /// Stacking order; higher values are drawn above lower ones.
    #[serde(default)]
    pub z: i64,
    /// Tri-state: absent means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default)]
    pub bake_layer: BakeLayer,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl ItemBase {
    /// Baseline fields for a fresh item.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            align: Anchor::TopLeft,
            margins: Margins::default(),
            rotation_deg: 0.0,
            z: 0,
            visible: None,
            bake_layer: BakeLayer::Front,
            opacity: 1.0,
        }
    }

    /// Visible unless the field is explicitly `false`.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }
}

// =============================================================================
// KIND PAYLOADS
// =============================================================================

/// Per-kind payload of an [`OverlayItem`].
///
/// Behavior differs between kinds only where geometry does: text boxes size
/// to their content, pictures and rectangles carry an explicit size.
pub trait ItemBody {
    const KIND: ItemKind;

    /// Explicit size in design units, if the kind has one.
    fn size(&self) -> Option<Size> {
        None
    }

    /// Overwrite the explicit size. No-op for kinds without one.
    fn set_size(&mut self, _size: Size) {}

    /// Replace the text content. No-op for kinds without text.
    fn set_text(&mut self, _text: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

fn default_font_family() -> String {
    "Inter".into()
}

fn default_font_size() -> f64 {
    48.0
}

fn default_font_weight() -> u16 {
    700
}

fn default_text_color() -> String {
    "#FFFFFF".into()
}

fn default_plaque_color() -> String {
    "#000000".into()
}

fn default_plaque_opacity() -> f64 {
    0.6
}

fn default_plaque_padding() -> f64 {
    16.0
}

fn default_plaque_radius() -> f64 {
    8.0
}

fn default_shadow_color() -> String {
    "rgba(0,0,0,0.5)".into()
}

fn default_shadow_blur() -> f64 {
    8.0
}

fn default_shadow_offset_y() -> f64 {
    2.0
}

/// Background box drawn behind a text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plaque {
    #[serde(rename = "plaqueEnabled", default)]
    pub enabled: bool,
    #[serde(rename = "plaqueColor", default = "default_plaque_color")]
    pub color: String,
    #[serde(rename = "plaqueOpacity", default = "default_plaque_opacity")]
    pub opacity: f64,
    #[serde(rename = "plaquePadding", default = "default_plaque_padding")]
    pub padding: f64,
    #[serde(rename = "plaqueRadius", default = "default_plaque_radius")]
    pub radius: f64,
}

impl Default for Plaque {
    fn default() -> Self {
        Self {
            enabled: false,
            color: default_plaque_color(),
            opacity: default_plaque_opacity(),
            padding: default_plaque_padding(),
            radius: default_plaque_radius(),
        }
    }
}

/// Drop shadow behind text glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    #[serde(rename = "shadowEnabled", default)]
    pub enabled: bool,
    #[serde(rename = "shadowColor", default = "default_shadow_color")]
    pub color: String,
    #[serde(rename = "shadowBlur", default = "default_shadow_blur")]
    pub blur: f64,
    #[serde(rename = "shadowOffsetX", default)]
    pub offset_x: f64,
    #[serde(rename = "shadowOffsetY", default = "default_shadow_offset_y")]
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            color: default_shadow_color(),
            blur: default_shadow_blur(),
            offset_x: 0.0,
            offset_y: default_shadow_offset_y(),
        }
    }
}

/// Text layer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBody {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default = "default_text_color")]
    pub color: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(flatten)]
    pub plaque: Plaque,
    #[serde(flatten)]
    pub shadow: Shadow,
}

impl Default for TextBody {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_style: FontStyle::Normal,
            color: default_text_color(),
            text_align: TextAlign::Center,
            plaque: Plaque::default(),
            shadow: Shadow::default(),
        }
    }
}

impl ItemBody for TextBody {
    const KIND: ItemKind = ItemKind::Text;

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

const DISH_SLOT_ROLE: &str = "DISH_SLOT";

/// Special purpose of a picture layer.
///
/// Roles this engine doesn't know are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PicRole {
    /// Placeholder the AI pipeline fills with the generated dish.
    DishSlot,
    Other(String),
}

impl From<String> for PicRole {
    fn from(raw: String) -> Self {
        if raw == DISH_SLOT_ROLE { Self::DishSlot } else { Self::Other(raw) }
    }
}

impl From<PicRole> for String {
    fn from(role: PicRole) -> Self {
        match role {
            PicRole::DishSlot => DISH_SLOT_ROLE.to_string(),
            PicRole::Other(raw) => raw,
        }
    }
}

/// Picture layer payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicBody {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Height divided by width. Derived from the size when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PicRole>,
}

impl PicBody {
    /// Aspect ratio (height / width) held fixed while resizing.
    #[must_use]
    pub fn effective_aspect_ratio(&self) -> f64 {
        match self.aspect_ratio {
            Some(r) if r.is_finite() && r > 0.0 => r,
            _ if self.width > 0.0 && self.height > 0.0 => self.height / self.width,
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn is_dish_slot(&self) -> bool {
        self.role == Some(PicRole::DishSlot)
    }
}

impl ItemBody for PicBody {
    const KIND: ItemKind = ItemKind::Pic;

    fn size(&self) -> Option<Size> {
        Some(Size::new(self.width, self.height))
    }

    fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }
}

/// One color stop of a linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient line, 0.0 to 1.0.
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradient {
    #[serde(default)]
    pub angle_deg: f64,
    pub stops: Vec<GradientStop>,
}

/// Rectangle fill: a CSS color string or a linear gradient object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Solid(String),
    Linear(LinearGradient),
}

impl Default for Fill {
    fn default() -> Self {
        Self::Solid("#FFFFFF".into())
    }
}

fn default_border_color() -> String {
    "#000000".into()
}

/// Rectangle layer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectBody {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub fill: Fill,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default)]
    pub border_radius: f64,
}

impl Default for RectBody {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            fill: Fill::default(),
            border_width: 0.0,
            border_color: default_border_color(),
            border_radius: 0.0,
        }
    }
}

impl ItemBody for RectBody {
    const KIND: ItemKind = ItemKind::Rect;

    fn size(&self) -> Option<Size> {
        Some(Size::new(self.width, self.height))
    }

    fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }
}

// =============================================================================
// ITEMS
// =============================================================================

/// An overlay item: shared fields plus a kind payload, flattened on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayItem<B> {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(flatten)]
    pub body: B,
}

pub type TextItem = OverlayItem<TextBody>;
pub type PicItem = OverlayItem<PicBody>;
pub type RectItem = OverlayItem<RectBody>;

impl<B: ItemBody> OverlayItem<B> {
    #[must_use]
    pub fn key(&self) -> LayerKey {
        LayerKey::new(B::KIND, self.base.id.clone())
    }

    /// Merge the present fields of `patch` into this item.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        let base = &mut self.base;
        if let Some(align) = patch.align {
            base.align = align;
        }
        if let Some(ref name) = patch.name {
            base.name.clone_from(name);
        }
        if let Some(v) = patch.margin_top {
            base.margins.top = v;
        }
        if let Some(v) = patch.margin_right {
            base.margins.right = v;
        }
        if let Some(v) = patch.margin_bottom {
            base.margins.bottom = v;
        }
        if let Some(v) = patch.margin_left {
            base.margins.left = v;
        }
        if let Some(r) = patch.rotation_deg {
            base.rotation_deg = normalize_rotation(r);
        }
        if let Some(z) = patch.z {
            base.z = z;
        }
        if let Some(visible) = patch.visible {
            base.visible = Some(visible);
        }
        if let Some(layer) = patch.bake_layer {
            base.bake_layer = layer;
        }
        if let Some(opacity) = patch.opacity {
            base.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(ref text) = patch.text {
            self.body.set_text(text);
        }
        if (patch.width.is_some() || patch.height.is_some())
            && let Some(size) = self.body.size()
        {
            self.body
                .set_size(Size::new(patch.width.unwrap_or(size.width), patch.height.unwrap_or(size.height)));
        }
    }
}

/// Sparse update for an overlay item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Anchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bake_layer: Option<BakeLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Ignored for pics and rects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Ignored for text items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Ignored for text items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ItemPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// OVERLAY
// =============================================================================

/// All layers of a design, grouped by kind in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    #[serde(default)]
    pub texts: Vec<TextItem>,
    #[serde(default)]
    pub pics: Vec<PicItem>,
    #[serde(default)]
    pub rects: Vec<RectItem>,
}

fn find<'a, B>(items: &'a [OverlayItem<B>], id: &str) -> Option<&'a OverlayItem<B>> {
    items.iter().find(|i| i.base.id == id)
}

fn patch_in<B: ItemBody>(items: &mut [OverlayItem<B>], id: &str, patch: &ItemPatch) -> bool {
    let Some(item) = items.iter_mut().find(|i| i.base.id == id) else {
        return false;
    };
    item.apply_patch(patch);
    true
}

fn remove_from<B>(items: &mut Vec<OverlayItem<B>>, id: &str) -> bool {
    let before = items.len();
    items.retain(|i| i.base.id != id);
    items.len() != before
}

impl Overlay {
    /// Parse overlay JSON and bring it to canonical form (see [`Overlay::normalize`]).
    ///
    /// # Errors
    ///
    /// Returns the serde error if the JSON does not match the overlay shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut overlay: Overlay = serde_json::from_str(json)?;
        overlay.normalize();
        Ok(overlay)
    }

    /// Normalize every rotation, pin unrecognized anchors to where they are
    /// drawn (top-left, fallback margins), and keep only the first dish slot.
    pub fn normalize(&mut self) {
        for base in self.bases_mut() {
            base.rotation_deg = normalize_rotation(base.rotation_deg);
            if base.align == Anchor::Unrecognized {
                (base.align, base.margins) = effective_layout(base.align, &base.margins);
            }
        }
        self.enforce_single_dish_slot();
    }

    /// Strip the dish-slot role from every pic after the first one carrying it.
    ///
    /// Returns the ids that lost the role.
    pub fn enforce_single_dish_slot(&mut self) -> Vec<String> {
        let mut seen = false;
        let mut demoted = Vec::new();
        for pic in &mut self.pics {
            if !pic.body.is_dish_slot() {
                continue;
            }
            if seen {
                pic.body.role = None;
                demoted.push(pic.base.id.clone());
            } else {
                seen = true;
            }
        }
        demoted
    }

    /// Total number of items across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len() + self.pics.len() + self.rects.len()
    }

    /// Returns `true` if the overlay has no items of any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items of one kind.
    #[must_use]
    pub fn count(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Text => self.texts.len(),
            ItemKind::Pic => self.pics.len(),
            ItemKind::Rect => self.rects.len(),
        }
    }

    /// Shared fields of the item identified by `key`.
    #[must_use]
    pub fn base(&self, key: &LayerKey) -> Option<&ItemBase> {
        match key.kind {
            ItemKind::Text => find(&self.texts, &key.id).map(|i| &i.base),
            ItemKind::Pic => find(&self.pics, &key.id).map(|i| &i.base),
            ItemKind::Rect => find(&self.rects, &key.id).map(|i| &i.base),
        }
    }

    /// Mutable shared fields of the item identified by `key`.
    pub fn base_mut(&mut self, key: &LayerKey) -> Option<&mut ItemBase> {
        match key.kind {
            ItemKind::Text => self.texts.iter_mut().find(|i| i.base.id == key.id).map(|i| &mut i.base),
            ItemKind::Pic => self.pics.iter_mut().find(|i| i.base.id == key.id).map(|i| &mut i.base),
            ItemKind::Rect => self.rects.iter_mut().find(|i| i.base.id == key.id).map(|i| &mut i.base),
        }
    }

    /// Explicit design size of the item, `None` for text or a missing key.
    #[must_use]
    pub fn size_of(&self, key: &LayerKey) -> Option<Size> {
        match key.kind {
            ItemKind::Text => None,
            ItemKind::Pic => find(&self.pics, &key.id).and_then(|i| i.body.size()),
            ItemKind::Rect => find(&self.rects, &key.id).and_then(|i| i.body.size()),
        }
    }

    #[must_use]
    pub fn pic(&self, id: &str) -> Option<&PicItem> {
        find(&self.pics, id)
    }

    #[must_use]
    pub fn contains(&self, key: &LayerKey) -> bool {
        self.base(key).is_some()
    }

    /// Whether any item of any kind uses `id`.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.bases().any(|(_, base)| base.id == id)
    }

    /// Every id in use, across kinds.
    #[must_use]
    pub fn ids(&self) -> HashSet<String> {
        self.bases().map(|(_, base)| base.id.clone()).collect()
    }

    /// Apply a sparse patch. Returns `false` if the item doesn't exist.
    pub fn apply_patch(&mut self, key: &LayerKey, patch: &ItemPatch) -> bool {
        match key.kind {
            ItemKind::Text => patch_in(&mut self.texts, &key.id, patch),
            ItemKind::Pic => patch_in(&mut self.pics, &key.id, patch),
            ItemKind::Rect => patch_in(&mut self.rects, &key.id, patch),
        }
    }

    /// Remove an item from its owning collection. Returns `false` if absent.
    pub fn remove(&mut self, key: &LayerKey) -> bool {
        match key.kind {
            ItemKind::Text => remove_from(&mut self.texts, &key.id),
            ItemKind::Pic => remove_from(&mut self.pics, &key.id),
            ItemKind::Rect => remove_from(&mut self.rects, &key.id),
        }
    }

    /// Shared fields of every item, texts first, then pics, then rects.
    pub fn bases(&self) -> impl Iterator<Item = (ItemKind, &ItemBase)> {
        let texts = self.texts.iter().map(|i| (ItemKind::Text, &i.base));
        let pics = self.pics.iter().map(|i| (ItemKind::Pic, &i.base));
        let rects = self.rects.iter().map(|i| (ItemKind::Rect, &i.base));
        texts.chain(pics).chain(rects)
    }

    /// Mutable shared fields of every item, in the same order as [`Overlay::bases`].
    pub fn bases_mut(&mut self) -> impl Iterator<Item = &mut ItemBase> {
        let texts = self.texts.iter_mut().map(|i| &mut i.base);
        let pics = self.pics.iter_mut().map(|i| &mut i.base);
        let rects = self.rects.iter_mut().map(|i| &mut i.base);
        texts.chain(pics).chain(rects)
    }

    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.bases().map(|(_, b)| b.z).max()
    }

    #[must_use]
    pub fn min_z(&self) -> Option<i64> {
        self.bases().map(|(_, b)| b.z).min()
    }

    /// The pic carrying the dish-slot role, if any.
    #[must_use]
    pub fn dish_slot(&self) -> Option<&PicItem> {
        self.pics.iter().find(|p| p.body.is_dish_slot())
    }
}
