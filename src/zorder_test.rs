use super::*;

#[test]
fn default_policy_constants() {
    let p = ZPolicy::default();
    assert_eq!(p.base, 10);
    assert_eq!(p.step, 10);
    assert_eq!(p.merge_offset, 100);
}

#[test]
fn slot_counts_from_bottom() {
    let p = ZPolicy::default();
    assert_eq!(p.slot(0), 10);
    assert_eq!(p.slot(1), 20);
    assert_eq!(p.slot(9), 100);
}

#[test]
fn above_steps_past_max() {
    let p = ZPolicy::default();
    assert_eq!(p.above(Some(40)), 50);
    assert_eq!(p.above(None), 10);
}

#[test]
fn renumber_spread_is_top_slot() {
    let p = ZPolicy::default();
    assert_eq!(p.renumber_spread(9), 90);
    assert_eq!(p.renumber_spread(10), 100);
    assert_eq!(p.renumber_spread(1), 10);
    assert_eq!(p.renumber_spread(0), 10);
}

#[test]
fn merge_clears_needs_offset_above_spread() {
    let p = ZPolicy::default();
    assert!(p.merge_clears(9));
    assert!(!p.merge_clears(10));
    assert!(!p.merge_clears(25));
}

#[test]
fn merge_clears_follows_changed_step() {
    let p = ZPolicy { base: 0, step: 50, merge_offset: 100 };
    assert!(p.merge_clears(2));
    assert!(!p.merge_clears(3));
}
