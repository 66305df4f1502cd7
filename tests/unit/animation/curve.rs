use super::*;

fn linear_curve() -> Curve {
    let mut c = Curve::new(0.0);
    c.add_point(CurvePoint::with_interpolation(0, 0.0, Interpolation::Linear));
    c.add_point(CurvePoint::with_interpolation(10, 10.0, Interpolation::Linear));
    c
}

#[test]
fn empty_curve_returns_default() {
    let c = Curve::new(1.0);
    assert_eq!(c.evaluate(FrameIndex(0)), 1.0);
    assert_eq!(c.evaluate(FrameIndex(9_999)), 1.0);
}

#[test]
fn linear_interpolates_and_holds_ends() {
    let mut c = Curve::new(0.0);
    c.add_point(CurvePoint::with_interpolation(5, 2.0, Interpolation::Linear));
    c.add_point(CurvePoint::with_interpolation(15, 4.0, Interpolation::Linear));
    assert_eq!(c.evaluate(FrameIndex(0)), 2.0);
    assert_eq!(c.evaluate(FrameIndex(10)), 3.0);
    assert_eq!(c.evaluate(FrameIndex(15)), 4.0);
    assert_eq!(c.evaluate(FrameIndex(100)), 4.0);
}

#[test]
fn constant_segment_holds_left_value() {
    let mut c = Curve::new(0.0);
    c.add_point(CurvePoint::new(1, 1.0));
    c.add_point(CurvePoint::with_interpolation(9, 3.0, Interpolation::Constant));
    assert_eq!(c.evaluate(FrameIndex(8)), 1.0);
    assert_eq!(c.evaluate(FrameIndex(9)), 3.0);
}

#[test]
fn bezier_segment_passes_through_midpoint() {
    let mut c = Curve::new(0.0);
    c.add_point(CurvePoint::new(0, 0.0));
    c.add_point(CurvePoint::new(10, 10.0));
    assert!((c.evaluate(FrameIndex(5)) - 5.0).abs() < 1e-9);
    assert!(c.evaluate(FrameIndex(2)) < 2.0);
}

#[test]
fn add_point_replaces_same_frame() {
    let mut c = linear_curve();
    c.add_point(CurvePoint::with_interpolation(10, 20.0, Interpolation::Linear));
    assert_eq!(c.len(), 2);
    assert_eq!(c.evaluate(FrameIndex(5)), 10.0);
}

#[test]
fn remove_and_contains() {
    let mut c = linear_curve();
    assert!(c.contains(FrameIndex(10)));
    assert!(c.remove_point(FrameIndex(10)));
    assert!(!c.contains(FrameIndex(10)));
    assert!(!c.remove_point(FrameIndex(10)));
    assert_eq!(c.evaluate(FrameIndex(7)), 0.0);
}

#[test]
fn set_points_sorts_and_last_write_wins() {
    let mut c = Curve::new(0.0);
    c.set_points([
        CurvePoint::new(10, 1.0),
        CurvePoint::new(0, 0.0),
        CurvePoint::new(10, 2.0),
    ]);
    let frames: Vec<u64> = c.points().iter().map(|p| p.frame.0).collect();
    assert_eq!(frames, vec![0, 10]);
    assert_eq!(c.points()[1].value, 2.0);
}

#[test]
fn closest_point_prefers_next_then_last() {
    let c = linear_curve();
    assert_eq!(c.closest_point(FrameIndex(3)).unwrap().frame, FrameIndex(10));
    assert_eq!(c.closest_point(FrameIndex(0)).unwrap().frame, FrameIndex(0));
    assert_eq!(c.closest_point(FrameIndex(50)).unwrap().frame, FrameIndex(10));
    assert!(Curve::new(0.0).closest_point(FrameIndex(0)).is_none());
}

#[test]
fn point_json_defaults_to_bezier() {
    let p: CurvePoint = serde_json::from_str(r#"{"frame": 4, "value": 1.5}"#).unwrap();
    assert_eq!(p, CurvePoint::new(4, 1.5));
}
