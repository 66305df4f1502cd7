use super::*;

fn track() -> BoxTrack {
    let mut t = BoxTrack::new();
    t.set_id("face-1");
    t.add_box(FrameIndex(0), 0.5, 0.5, 0.2, 0.4, 0.0);
    t
}

#[test]
fn sheet_has_every_property() {
    let sheet = track().properties(FrameIndex(0));
    let keys: Vec<&str> = sheet.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "box_id", "delta_x", "delta_y", "rotation", "scale_x", "scale_y", "visible", "x1",
            "x2", "y1", "y2"
        ]
    );
}

#[test]
fn corners_follow_the_final_box() {
    let sheet = track().properties(FrameIndex(0));
    let x1 = sheet["x1"].value.as_f64().unwrap();
    let y2 = sheet["y2"].value.as_f64().unwrap();
    assert!((x1 - 0.4).abs() < 1e-12);
    assert!((y2 - 0.7).abs() < 1e-12);
    assert!(sheet["x1"].readonly);
    assert_eq!(sheet["box_id"].value, serde_json::json!("face-1"));
}

#[test]
fn visible_choices_track_the_flag() {
    let mut t = track();
    t.set_visible(false);
    let sheet = t.properties(FrameIndex(0));
    let visible = &sheet["visible"];
    assert_eq!(visible.kind, PropertyKind::Bool);
    assert_eq!(visible.choices.len(), 2);
    assert!(!visible.choices[0].selected);
    assert!(visible.choices[1].selected);
}

#[test]
fn curve_properties_report_keyframes() {
    let mut t = track();
    t.adjustments.delta_x.add_point(CurvePoint::new(10, 0.25));
    t.adjustments
        .delta_x
        .add_point(CurvePoint::with_interpolation(20, 0.5, Interpolation::Linear));

    let at_key = t.properties(FrameIndex(10));
    let dx = &at_key["delta_x"];
    assert!(dx.keyframe);
    assert_eq!(dx.value, serde_json::json!(0.25));
    assert_eq!(dx.keyframe_points.len(), 2);
    assert_eq!(dx.interpolation, Some(Interpolation::Bezier));

    let between = t.properties(FrameIndex(15));
    assert!(!between["delta_x"].keyframe);
    assert_eq!(between["delta_x"].interpolation, Some(Interpolation::Linear));
    assert_eq!(between["delta_y"].interpolation, None);
    assert_eq!(between["scale_x"].value, serde_json::json!(1.0));
}

#[test]
fn properties_json_uses_type_key() {
    let v = track().properties_json(FrameIndex(0)).unwrap();
    assert_eq!(v["visible"]["type"], "bool");
    assert_eq!(v["rotation"]["max"], 360.0);
    assert_eq!(v["box_id"]["type"], "string");
}

#[test]
fn box_values_on_empty_track_are_sentinel_with_identity_curves() {
    let values = BoxTrack::new().box_values(FrameIndex(3));
    assert_eq!(values.len(), 10);
    assert_eq!(values["cx"], -1.0);
    assert_eq!(values["ang"], -1.0);
    assert_eq!(values["sx"], 1.0);
    assert_eq!(values["dx"], 0.0);
    assert_eq!(values["r"], 0.0);
}

#[test]
fn box_values_report_adjusted_box() {
    let mut t = track();
    t.adjustments.scale_x.add_point(CurvePoint::new(0, 2.0));
    t.adjustments.rotation.add_point(CurvePoint::new(0, 30.0));
    let values = t.box_values(FrameIndex(0));
    assert!((values["w"] - 0.4).abs() < 1e-12);
    assert_eq!(values["ang"], 30.0);
    assert_eq!(values["sx"], 2.0);
    assert_eq!(values["r"], 30.0);
}

#[test]
fn empty_track_reports_sentinel_corners() {
    let sheet = BoxTrack::new().properties(FrameIndex(0));
    for key in ["x1", "y1", "x2", "y2"] {
        assert_eq!(sheet[key].value, serde_json::json!(-1.0), "{key}");
    }
}
