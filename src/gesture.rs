//! Pointer input types and the gesture state machine.
//!
//! A gesture lives from pointer-down to pointer-up. [`Gesture`] holds at most
//! one session, so drag, resize and rotate are mutually exclusive by
//! construction. The host tells the editor what was under the pointer via a
//! [`Hit`]; hit regions are host-measured because text boxes size to content.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::drag::DragSession;
use crate::geom::{Bounds, Point};
use crate::model::{ItemPatch, LayerKey};
use crate::resize::ResizeSession;
use crate::rotate::RotateSession;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held. Snaps rotation to the grid.
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Which part of an item the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The item body. Starts a drag.
    Body,
    /// The bottom-right resize handle. Pics and rects only.
    ResizeHandle,
    /// The rotation handle above the box.
    RotateHandle,
}

/// Host-reported result of hit-testing a pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub key: LayerKey,
    pub part: HitPart,
    /// The item's preview-space box at the time of the hit.
    pub bounds: Bounds,
}

impl Hit {
    #[must_use]
    pub fn new(key: LayerKey, part: HitPart, bounds: Bounds) -> Self {
        Self { key, part, bounds }
    }
}

/// The active gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
    Rotating(RotateSession),
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The item the active session operates on.
    #[must_use]
    pub fn key(&self) -> Option<&LayerKey> {
        match self {
            Self::Idle => None,
            Self::Dragging(s) => Some(&s.key),
            Self::Resizing(s) => Some(&s.key),
            Self::Rotating(s) => Some(&s.key),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging(_) => "drag",
            Self::Resizing(_) => "resize",
            Self::Rotating(_) => "rotate",
        }
    }

    /// Patch for the current pointer position, or `None` when idle.
    #[must_use]
    pub fn update(&self, pointer: Point, mods: Modifiers) -> Option<(LayerKey, ItemPatch)> {
        match self {
            Self::Idle => None,
            Self::Dragging(s) => Some((s.key.clone(), s.update(pointer))),
            Self::Resizing(s) => Some((s.key.clone(), s.update(pointer))),
            Self::Rotating(s) => Some((s.key.clone(), s.update(pointer, mods.shift))),
        }
    }
}
