#![allow(clippy::float_cmp)]

use super::*;

fn css(top: Option<&str>, right: Option<&str>, bottom: Option<&str>, left: Option<&str>, transform: Option<&str>) -> CssPlacement {
    CssPlacement {
        top: top.map(String::from),
        right: right.map(String::from),
        bottom: bottom.map(String::from),
        left: left.map(String::from),
        transform: transform.map(String::from),
    }
}

fn assert_margins_close(a: &Margins, b: &Margins) {
    let pairs = [(a.top, b.top), (a.right, b.right), (a.bottom, b.bottom), (a.left, b.left)];
    for (x, y) in pairs {
        assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
    }
}

// =============================================================
// resolve
// =============================================================

#[test]
fn middle_center_zero_margins() {
    let p = resolve(Anchor::MiddleCenter, &Margins::default(), Scale::uniform(0.5));
    assert_eq!(
        p.to_css(),
        css(Some("50%"), None, None, Some("50%"), Some("translate(-50%,-50%) translate(0px,0px)"))
    );
}

#[test]
fn top_left_uses_top_and_left() {
    let p = resolve(Anchor::TopLeft, &Margins::new(20.0, 99.0, 99.0, 40.0), Scale::uniform(0.5));
    assert_eq!(p.vertical, AxisPlacement::Start(10.0));
    assert_eq!(p.horizontal, AxisPlacement::Start(20.0));
    assert_eq!(p.to_css(), css(Some("10px"), None, None, Some("20px"), None));
}

#[test]
fn bottom_right_uses_bottom_and_right() {
    let p = resolve(Anchor::BottomRight, &Margins::new(99.0, 30.0, 60.0, 99.0), Scale::new(0.5, 0.25));
    assert_eq!(p.vertical, AxisPlacement::End(15.0));
    assert_eq!(p.horizontal, AxisPlacement::End(15.0));
    assert_eq!(p.to_css(), css(None, Some("15px"), Some("15px"), None, None));
}

#[test]
fn center_axes_bias_by_margin_difference() {
    let p = resolve(Anchor::MiddleCenter, &Margins::new(40.0, 10.0, 20.0, 30.0), Scale::new(2.0, 0.5));
    assert_eq!(p.horizontal, AxisPlacement::Center { shift: 40.0 });
    assert_eq!(p.vertical, AxisPlacement::Center { shift: 10.0 });
    assert_eq!(p.to_css().transform.as_deref(), Some("translate(-50%,-50%) translate(40px,10px)"));
}

#[test]
fn top_center_translates_horizontally_only() {
    let p = resolve(Anchor::TopCenter, &Margins::new(8.0, 0.0, 0.0, -10.0), Scale::uniform(1.0));
    assert_eq!(
        p.to_css(),
        css(Some("8px"), None, None, Some("50%"), Some("translate(-50%,0) translate(-10px,0px)"))
    );
}

#[test]
fn middle_right_translates_vertically_only() {
    let p = resolve(Anchor::MiddleRight, &Margins::new(0.0, 12.0, 6.0, 0.0), Scale::uniform(1.0));
    assert_eq!(
        p.to_css(),
        css(Some("50%"), Some("12px"), None, None, Some("translate(0,-50%) translate(0px,-6px)"))
    );
}

#[test]
fn unrecognized_anchor_falls_back_to_top_left_fixed_margins() {
    let p = resolve(Anchor::Unrecognized, &Margins::new(500.0, 500.0, 500.0, 500.0), Scale::uniform(0.5));
    assert_eq!(p.vertical, AxisPlacement::Start(5.0));
    assert_eq!(p.horizontal, AxisPlacement::Start(5.0));
}

#[test]
fn effective_layout_passes_recognized_through() {
    let m = Margins::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(effective_layout(Anchor::BottomLeft, &m), (Anchor::BottomLeft, m));
    assert_eq!(effective_layout(Anchor::Unrecognized, &m), (Anchor::TopLeft, Margins::uniform(10.0)));
}

// =============================================================
// recover_margins
// =============================================================

#[test]
fn resolve_then_recover_is_identity_for_all_anchors() {
    let margins = [
        Margins::new(0.0, 0.0, 0.0, 0.0),
        Margins::new(12.5, -3.0, 40.0, 7.25),
        Margins::new(-100.0, 250.0, 0.1, 999.0),
    ];
    let scales = [Scale::uniform(1.0), Scale::new(0.5, 0.25), Scale::new(0.333, 1.7)];
    for anchor in Anchor::ALL {
        for m in &margins {
            for scale in scales {
                let placement = resolve(anchor, m, scale);
                let back = recover_margins(anchor, &placement, scale, m);
                assert_margins_close(&back, m);
            }
        }
    }
}

#[test]
fn recover_reads_only_anchor_margins() {
    let scale = Scale::uniform(0.5);
    let placement = Placement { vertical: AxisPlacement::End(10.0), horizontal: AxisPlacement::Start(5.0) };
    let back = recover_margins(Anchor::BottomLeft, &placement, scale, &Margins::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(back, Margins::new(1.0, 2.0, 20.0, 10.0));
}

// =============================================================
// bounds
// =============================================================

#[test]
fn bounds_for_each_axis_mode() {
    let container = Size::new(500.0, 400.0);
    let item = Size::new(100.0, 50.0);

    let tl = resolve(Anchor::TopLeft, &Margins::new(10.0, 0.0, 0.0, 20.0), Scale::uniform(1.0));
    assert_eq!(tl.bounds(container, item), Bounds::new(20.0, 10.0, 100.0, 50.0));

    let br = resolve(Anchor::BottomRight, &Margins::new(0.0, 20.0, 10.0, 0.0), Scale::uniform(1.0));
    assert_eq!(br.bounds(container, item), Bounds::new(380.0, 340.0, 100.0, 50.0));

    let mc = resolve(Anchor::MiddleCenter, &Margins::new(30.0, 0.0, 0.0, 0.0), Scale::uniform(1.0));
    assert_eq!(mc.bounds(container, item), Bounds::new(200.0, 205.0, 100.0, 50.0));
}
