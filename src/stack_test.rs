use super::*;
use crate::model::{ItemBase, OverlayItem, PicBody, RectBody, TextBody};

fn text(id: &str, z: i64) -> crate::model::TextItem {
    let mut base = ItemBase::new(id);
    base.z = z;
    OverlayItem { base, body: TextBody { text: format!("text {id}"), ..Default::default() } }
}

fn pic(id: &str, z: i64) -> crate::model::PicItem {
    let mut base = ItemBase::new(id);
    base.z = z;
    OverlayItem { base, body: PicBody { width: 100.0, height: 100.0, ..Default::default() } }
}

fn rect(id: &str, z: i64) -> crate::model::RectItem {
    let mut base = ItemBase::new(id);
    base.z = z;
    OverlayItem { base, body: RectBody { width: 100.0, height: 100.0, ..Default::default() } }
}

fn t(id: &str) -> LayerKey {
    LayerKey::new(ItemKind::Text, id)
}

fn p(id: &str) -> LayerKey {
    LayerKey::new(ItemKind::Pic, id)
}

fn r(id: &str) -> LayerKey {
    LayerKey::new(ItemKind::Rect, id)
}

fn sample() -> Overlay {
    Overlay {
        texts: vec![text("t1", 30), text("t2", 5)],
        pics: vec![pic("p1", 20)],
        rects: vec![rect("r1", 40)],
    }
}

fn zs(overlay: &Overlay) -> Vec<(LayerKey, i64)> {
    overlay.layers().into_iter().map(|e| (e.key, e.z)).collect()
}

// =============================================================
// layers
// =============================================================

#[test]
fn layers_sorted_by_z_descending() {
    assert_eq!(sample().layer_keys(), vec![r("r1"), t("t1"), p("p1"), t("t2")]);
}

#[test]
fn layers_ties_break_by_kind_then_later_insertion() {
    let overlay = Overlay {
        texts: vec![text("a", 10), text("b", 10)],
        pics: vec![pic("c", 10)],
        rects: vec![rect("d", 10)],
    };
    assert_eq!(overlay.layer_keys(), vec![t("b"), t("a"), p("c"), r("d")]);
}

#[test]
fn layers_labels_fall_back_by_kind() {
    let mut overlay = sample();
    overlay.rects[0].base.name = "Banner".into();
    let labels: Vec<String> = overlay.layers().into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Banner", "text t1", "Image", "text t2"]);
}

// =============================================================
// renumber_z
// =============================================================

#[test]
fn renumber_assigns_base_plus_step_from_bottom() {
    let mut overlay = sample();
    let order = overlay.layer_keys();
    overlay.renumber_z(&order, &ZPolicy::default());
    assert_eq!(zs(&overlay), vec![(r("r1"), 40), (t("t1"), 30), (p("p1"), 20), (t("t2"), 10)]);
}

#[test]
fn renumber_is_idempotent() {
    let mut overlay = Overlay {
        texts: vec![text("a", 7), text("b", 7), text("c", -3)],
        pics: vec![pic("d", 7), pic("e", 1000)],
        rects: vec![rect("f", 7)],
    };
    let policy = ZPolicy::default();
    let order = overlay.layer_keys();
    overlay.renumber_z(&order, &policy);
    let once = zs(&overlay);

    let order = overlay.layer_keys();
    overlay.renumber_z(&order, &policy);
    assert_eq!(zs(&overlay), once);
}

#[test]
fn renumber_skips_unknown_keys() {
    let mut overlay = sample();
    overlay.renumber_z(&[t("t1"), t("ghost"), p("p1")], &ZPolicy::default());
    assert_eq!(overlay.base(&p("p1")).map(|b| b.z), Some(10));
    assert_eq!(overlay.base(&t("t1")).map(|b| b.z), Some(20));
    assert_eq!(overlay.base(&r("r1")).map(|b| b.z), Some(40));
}

// =============================================================
// move_layer
// =============================================================

#[test]
fn move_up_swaps_with_neighbour() {
    let mut overlay = sample();
    assert!(overlay.move_layer(&p("p1"), MoveDirection::Up, &ZPolicy::default()));
    assert_eq!(overlay.layer_keys(), vec![r("r1"), p("p1"), t("t1"), t("t2")]);
    assert_eq!(zs(&overlay)[1], (p("p1"), 30));
}

#[test]
fn move_down_swaps_with_neighbour() {
    let mut overlay = sample();
    assert!(overlay.move_layer(&r("r1"), MoveDirection::Down, &ZPolicy::default()));
    assert_eq!(overlay.layer_keys(), vec![t("t1"), r("r1"), p("p1"), t("t2")]);
}

#[test]
fn move_past_ends_is_noop() {
    let mut overlay = sample();
    let before = zs(&overlay);
    assert!(!overlay.move_layer(&r("r1"), MoveDirection::Up, &ZPolicy::default()));
    assert!(!overlay.move_layer(&t("t2"), MoveDirection::Down, &ZPolicy::default()));
    assert!(!overlay.move_layer(&t("ghost"), MoveDirection::Up, &ZPolicy::default()));
    assert_eq!(zs(&overlay), before);
}

#[test]
fn move_resolves_ties_deterministically() {
    let mut overlay = Overlay { texts: vec![text("a", 10), text("b", 10)], ..Default::default() };
    assert!(overlay.move_layer(&t("a"), MoveDirection::Up, &ZPolicy::default()));
    assert_eq!(overlay.layer_keys(), vec![t("a"), t("b")]);
    assert_eq!(overlay.base(&t("a")).map(|b| b.z), Some(20));
    assert_eq!(overlay.base(&t("b")).map(|b| b.z), Some(10));
}

// =============================================================
// toggles
// =============================================================

#[test]
fn toggle_visible_tri_state() {
    let mut overlay = sample();
    assert_eq!(overlay.base(&t("t1")).and_then(|b| b.visible), None);
    assert_eq!(overlay.toggle_visible(&t("t1")), Some(false));
    assert_eq!(overlay.toggle_visible(&t("t1")), Some(true));
    assert_eq!(overlay.base(&t("t1")).and_then(|b| b.visible), Some(true));
    assert_eq!(overlay.toggle_visible(&t("ghost")), None);
}

#[test]
fn toggle_bake_layer_flips() {
    let mut overlay = sample();
    assert_eq!(overlay.toggle_bake_layer(&p("p1")), Some(BakeLayer::Baked));
    assert_eq!(overlay.toggle_bake_layer(&p("p1")), Some(BakeLayer::Front));
}

// =============================================================
// delete_layer
// =============================================================

#[test]
fn delete_clears_selection_when_selected() {
    let mut overlay = sample();
    let sel = SelectionHandle::new();
    sel.set(Some(p("p1")));
    assert!(overlay.delete_layer(&p("p1"), &sel));
    assert!(sel.get().is_none());
    assert!(!overlay.contains(&p("p1")));
}

#[test]
fn delete_keeps_other_selection() {
    let mut overlay = sample();
    let sel = SelectionHandle::new();
    sel.set(Some(t("t1")));
    assert!(overlay.delete_layer(&r("r1"), &sel));
    assert_eq!(sel.get(), Some(t("t1")));
}

#[test]
fn delete_missing_is_noop() {
    let mut overlay = sample();
    let sel = SelectionHandle::new();
    sel.set(Some(t("t1")));
    assert!(!overlay.delete_layer(&t("ghost"), &sel));
    assert_eq!(overlay.len(), 4);
    assert_eq!(sel.get(), Some(t("t1")));
}

// =============================================================
// topmost_at
// =============================================================

#[test]
fn topmost_prefers_higher_z() {
    let overlay = sample();
    let everywhere = |_: &LayerKey| Some(Bounds::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(overlay.topmost_at(Point::new(5.0, 5.0), everywhere), Some(r("r1")));
}

#[test]
fn topmost_skips_hidden_and_unmeasured() {
    let mut overlay = sample();
    overlay.toggle_visible(&r("r1"));
    let bounds = |k: &LayerKey| {
        if *k == t("t1") { None } else { Some(Bounds::new(0.0, 0.0, 100.0, 100.0)) }
    };
    assert_eq!(overlay.topmost_at(Point::new(5.0, 5.0), bounds), Some(p("p1")));
    assert_eq!(overlay.topmost_at(Point::new(500.0, 5.0), bounds), None);
}
