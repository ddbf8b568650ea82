//! Resize gesture for pictures and rectangles.
//!
//! Pictures keep their aspect ratio: only the horizontal delta drives width
//! and height follows as `round(width * aspect_ratio)`. Rectangles take both
//! deltas independently. In both cases the right and bottom margins absorb
//! the size change (see [`compensate_margins`]).

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::consts::MIN_RESIZE_SIZE;
use crate::geom::{Point, Scale, Size};
use crate::model::{ItemBase, ItemPatch, LayerKey, Margins, PicBody, RectBody};

/// How width and height relate during a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeMode {
    /// Height is derived from width; `aspect_ratio` is height / width.
    AspectLocked { aspect_ratio: f64 },
    /// Width and height follow the pointer independently.
    Free,
}

/// Margins after a resize from `start_size` to `new_size`.
///
/// The right and bottom margins shrink by exactly the growth on their axis;
/// top and left are untouched.
#[must_use]
pub fn compensate_margins(start_size: Size, start_margins: &Margins, new_size: Size) -> Margins {
    Margins {
        right: start_margins.right - (new_size.width - start_size.width),
        bottom: start_margins.bottom - (new_size.height - start_size.height),
        ..*start_margins
    }
}

/// An active resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub key: LayerKey,
    pub mode: ResizeMode,
    pub start_pointer: Point,
    pub start_size: Size,
    pub start_margins: Margins,
    pub scale: Scale,
}

impl ResizeSession {
    /// Start an aspect-locked resize of a picture.
    ///
    /// The aspect ratio is captured here and held for the whole session.
    #[must_use]
    pub fn begin_pic(key: LayerKey, base: &ItemBase, body: &PicBody, pointer: Point, scale: Scale) -> Self {
        Self {
            key,
            mode: ResizeMode::AspectLocked { aspect_ratio: body.effective_aspect_ratio() },
            start_pointer: pointer,
            start_size: Size::new(body.width, body.height),
            start_margins: base.margins,
            scale,
        }
    }

    /// Start a free resize of a rectangle.
    #[must_use]
    pub fn begin_rect(key: LayerKey, base: &ItemBase, body: &RectBody, pointer: Point, scale: Scale) -> Self {
        Self {
            key,
            mode: ResizeMode::Free,
            start_pointer: pointer,
            start_size: Size::new(body.width, body.height),
            start_margins: base.margins,
            scale,
        }
    }

    /// Design-space size for the current pointer position.
    #[must_use]
    pub fn size_at(&self, pointer: Point) -> Size {
        let (dx, dy) = self
            .scale
            .to_design(pointer.x - self.start_pointer.x, pointer.y - self.start_pointer.y);
        let width = (self.start_size.width + dx).max(MIN_RESIZE_SIZE);
        match self.mode {
            ResizeMode::AspectLocked { aspect_ratio } => Size::new(width, (width * aspect_ratio).round()),
            ResizeMode::Free => Size::new(width, (self.start_size.height + dy).max(MIN_RESIZE_SIZE)),
        }
    }

    /// Patch with the new size and compensated right/bottom margins.
    #[must_use]
    pub fn update(&self, pointer: Point) -> ItemPatch {
        let size = self.size_at(pointer);
        let margins = compensate_margins(self.start_size, &self.start_margins, size);
        ItemPatch {
            width: Some(size.width),
            height: Some(size.height),
            margin_right: Some(margins.right),
            margin_bottom: Some(margins.bottom),
            ..Default::default()
        }
    }
}
