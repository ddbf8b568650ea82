use super::*;
use crate::model::ItemKind;

fn key(kind: ItemKind, id: &str) -> LayerKey {
    LayerKey::new(kind, id)
}

#[test]
fn new_handle_is_empty() {
    assert_eq!(SelectionHandle::new().get(), None);
}

#[test]
fn set_reports_change() {
    let sel = SelectionHandle::new();
    assert!(sel.set(Some(key(ItemKind::Text, "a"))));
    assert!(!sel.set(Some(key(ItemKind::Text, "a"))));
    assert!(sel.set(None));
}

#[test]
fn selection_is_exclusive_across_kinds() {
    let sel = SelectionHandle::new();
    sel.set(Some(key(ItemKind::Text, "a")));
    sel.set(Some(key(ItemKind::Pic, "a")));
    assert!(sel.is(&key(ItemKind::Pic, "a")));
    assert!(!sel.is(&key(ItemKind::Text, "a")));
}

#[test]
fn clones_observe_later_writes() {
    let sel = SelectionHandle::new();
    let listener = sel.clone();
    let callback = move || listener.get();

    sel.set(Some(key(ItemKind::Rect, "r1")));
    assert_eq!(callback(), Some(key(ItemKind::Rect, "r1")));

    sel.set(Some(key(ItemKind::Pic, "p1")));
    assert_eq!(callback(), Some(key(ItemKind::Pic, "p1")));
}

#[test]
fn clear_if_only_clears_matching() {
    let sel = SelectionHandle::new();
    sel.set(Some(key(ItemKind::Text, "a")));
    assert!(!sel.clear_if(&key(ItemKind::Text, "b")));
    assert!(sel.get().is_some());
    assert!(sel.clear_if(&key(ItemKind::Text, "a")));
    assert!(sel.get().is_none());
}
