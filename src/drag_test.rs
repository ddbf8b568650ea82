#![allow(clippy::float_cmp)]

use super::*;
use crate::layout::{recover_margins, resolve};
use crate::geom::Size;
use crate::model::{ItemKind, TextItem};

fn base_with(align: Anchor, margins: Margins) -> ItemBase {
    let mut base = ItemBase::new("t1");
    base.align = align;
    base.margins = margins;
    base
}

fn key() -> LayerKey {
    LayerKey::new(ItemKind::Text, "t1")
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn top_left_at_half_scale_doubles_delta() {
    let base = base_with(Anchor::TopLeft, Margins::new(100.0, 0.0, 0.0, 50.0));
    let s = DragSession::begin(key(), &base, pt(300.0, 300.0), Scale::uniform(0.5));
    let patch = s.update(pt(320.0, 310.0));
    assert_eq!(patch.margin_left, Some(90.0));
    assert_eq!(patch.margin_top, Some(120.0));
    assert_eq!(patch.margin_right, None);
    assert_eq!(patch.margin_bottom, None);
    assert_eq!(patch.align, None);
}

#[test]
fn bottom_right_subtracts_from_far_margins() {
    let base = base_with(Anchor::BottomRight, Margins::new(0.0, 40.0, 60.0, 0.0));
    let s = DragSession::begin(key(), &base, pt(0.0, 0.0), Scale::uniform(1.0));
    let patch = s.update(pt(10.0, 5.0));
    assert_eq!(patch.margin_right, Some(30.0));
    assert_eq!(patch.margin_bottom, Some(55.0));
    assert_eq!(patch.margin_left, None);
    assert_eq!(patch.margin_top, None);
}

#[test]
fn middle_center_moves_near_margins() {
    let base = base_with(Anchor::MiddleCenter, Margins::default());
    let s = DragSession::begin(key(), &base, pt(0.0, 0.0), Scale::new(2.0, 4.0));
    let patch = s.update(pt(-20.0, 8.0));
    assert_eq!(patch.margin_left, Some(-10.0));
    assert_eq!(patch.margin_top, Some(2.0));
}

#[test]
fn deltas_are_measured_from_start_not_previous_move() {
    let base = base_with(Anchor::TopLeft, Margins::default());
    let s = DragSession::begin(key(), &base, pt(0.0, 0.0), Scale::uniform(1.0));
    let first = s.update(pt(5.0, 5.0));
    let second = s.update(pt(5.0, 5.0));
    assert_eq!(first, second);
}

#[test]
fn returning_to_start_restores_margins() {
    let m = Margins::new(11.0, 22.0, 33.0, 44.0);
    let base = base_with(Anchor::BottomCenter, m);
    let s = DragSession::begin(key(), &base, pt(7.0, 9.0), Scale::new(0.3, 0.7));
    let _far = s.update(pt(100.0, -50.0));
    let patch = s.update(pt(7.0, 9.0));
    assert_eq!(patch.margin_bottom, Some(33.0));
    assert_eq!(patch.margin_left, Some(44.0));
}

#[test]
fn drag_moves_preview_position_by_pointer_delta() {
    let scale = Scale::new(0.5, 0.25);
    for anchor in Anchor::ALL {
        let m = Margins::new(40.0, 30.0, 20.0, 10.0);
        let base = base_with(anchor, m);
        let s = DragSession::begin(key(), &base, pt(0.0, 0.0), scale);

        let patch = s.update(pt(12.0, -6.0));
        let mut item = TextItem { base: base.clone(), body: Default::default() };
        item.apply_patch(&patch);
        let moved = item.base;

        let container = Size::new(1000.0, 1000.0);
        let box_size = Size::new(10.0, 10.0);
        let before = resolve(anchor, &base.margins, scale).bounds(container, box_size);
        let after = resolve(anchor, &moved.margins, scale).bounds(container, box_size);
        assert!((after.x - before.x - 12.0).abs() < 1e-9, "{anchor:?} x");
        assert!((after.y - before.y + 6.0).abs() < 1e-9, "{anchor:?} y");

        let recovered = recover_margins(anchor, &resolve(anchor, &moved.margins, scale), scale, &moved.margins);
        assert!((recovered.top - moved.margins.top).abs() < 1e-9);
    }
}

#[test]
fn unrecognized_anchor_materializes_top_left() {
    let base = base_with(Anchor::Unrecognized, Margins::new(500.0, 500.0, 500.0, 500.0));
    let s = DragSession::begin(key(), &base, pt(0.0, 0.0), Scale::uniform(1.0));
    assert_eq!(s.anchor, Anchor::TopLeft);
    let patch = s.update(pt(5.0, 5.0));
    assert_eq!(patch.align, Some(Anchor::TopLeft));
    assert_eq!(patch.margin_top, Some(15.0));
    assert_eq!(patch.margin_left, Some(15.0));
    assert_eq!(patch.margin_right, Some(10.0));
    assert_eq!(patch.margin_bottom, Some(10.0));
}
