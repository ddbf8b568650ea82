//! Rotation gesture and angle normalization.
//!
//! The pivot is the item's on-screen box center, sampled once when the gesture
//! starts. Every move measures the pointer's angle around that pivot and adds
//! the change since the start to the starting rotation, so the result never
//! accumulates frame-to-frame drift.

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;

use crate::consts::ROTATION_SNAP_DEG;
use crate::geom::Point;
use crate::model::{ItemPatch, LayerKey};

/// Bring any angle into (-180, 180]. Non-finite input maps to 0.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = ((deg + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;
    if wrapped <= -180.0 { 180.0 } else { wrapped + 0.0 }
}

/// Angle of `pointer` around `pivot`, in degrees.
#[must_use]
pub fn pointer_angle_deg(pivot: Point, pointer: Point) -> f64 {
    (pointer.y - pivot.y).atan2(pointer.x - pivot.x).to_degrees()
}

/// Round a delta to the snap grid.
#[must_use]
pub fn snap_delta(delta: f64) -> f64 {
    (delta / ROTATION_SNAP_DEG).round() * ROTATION_SNAP_DEG
}

/// An active rotate gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateSession {
    pub key: LayerKey,
    /// Preview-space center of the item at gesture start.
    pub pivot: Point,
    /// Pointer angle around the pivot at gesture start.
    pub start_angle: f64,
    /// Item rotation at gesture start.
    pub start_rotation: f64,
}

impl RotateSession {
    #[must_use]
    pub fn begin(key: LayerKey, start_rotation: f64, pivot: Point, pointer: Point) -> Self {
        Self { key, pivot, start_angle: pointer_angle_deg(pivot, pointer), start_rotation }
    }

    /// Normalized rotation for the current pointer position.
    #[must_use]
    pub fn rotation_at(&self, pointer: Point, snap: bool) -> f64 {
        let mut delta = pointer_angle_deg(self.pivot, pointer) - self.start_angle;
        if snap {
            delta = snap_delta(delta);
        }
        normalize_rotation(self.start_rotation + delta)
    }

    /// Patch for the current pointer position.
    #[must_use]
    pub fn update(&self, pointer: Point, snap: bool) -> ItemPatch {
        ItemPatch { rotation_deg: Some(self.rotation_at(pointer, snap)), ..Default::default() }
    }
}
