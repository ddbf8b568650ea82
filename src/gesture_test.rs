use super::*;
use crate::geom::Scale;
use crate::model::{ItemBase, ItemKind};

fn text_key() -> LayerKey {
    LayerKey::new(ItemKind::Text, "t1")
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn modifiers_shift_only() {
    let m = Modifiers::shift();
    assert!(m.shift);
    assert!(!m.ctrl && !m.alt && !m.meta);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn idle_has_no_key_or_patch() {
    let g = Gesture::default();
    assert!(g.is_idle());
    assert_eq!(g.key(), None);
    assert_eq!(g.name(), "idle");
    assert_eq!(g.update(Point::new(1.0, 1.0), Modifiers::default()), None);
}

#[test]
fn dragging_reports_key_and_patch() {
    let base = ItemBase::new("t1");
    let g = Gesture::Dragging(DragSession::begin(text_key(), &base, Point::new(0.0, 0.0), Scale::uniform(1.0)));
    assert!(!g.is_idle());
    assert_eq!(g.key(), Some(&text_key()));
    assert_eq!(g.name(), "drag");

    let (key, patch) = g.update(Point::new(5.0, 7.0), Modifiers::default()).expect("drag patch");
    assert_eq!(key, text_key());
    assert_eq!(patch.margin_left, Some(5.0));
    assert_eq!(patch.margin_top, Some(7.0));
}

#[test]
fn rotating_snaps_with_shift() {
    let s = RotateSession::begin(text_key(), 0.0, Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    let g = Gesture::Rotating(s);
    // 20 degrees off the start angle.
    let pointer = Point::new(20f64.to_radians().cos() * 10.0, 20f64.to_radians().sin() * 10.0);

    let free = g.update(pointer, Modifiers::default()).and_then(|(_, p)| p.rotation_deg).unwrap_or(f64::NAN);
    let snapped = g.update(pointer, Modifiers::shift()).and_then(|(_, p)| p.rotation_deg).unwrap_or(f64::NAN);
    assert!((free - 20.0).abs() < 1e-9);
    assert!((snapped - 15.0).abs() < 1e-9);
}
