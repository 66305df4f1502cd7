use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn default_is_unset_sentinel() {
    let b = BBox::default();
    assert!(b.is_unset());
    assert_eq!(b.cx, -1.0);
    assert_eq!(b.angle, -1.0);
    assert!(!BBox::new(0.5, 0.5, 0.1, 0.1, 0.0).is_unset());
}

#[test]
fn from_corners_centers_the_box() {
    let b = BBox::from_corners(0.2, 0.4, 0.6, 1.0, 15.0);
    assert!(approx(b.cx, 0.4));
    assert!(approx(b.cy, 0.7));
    assert!(approx(b.width, 0.4));
    assert!(approx(b.height, 0.6));
    assert!(approx(b.x1(), 0.2));
    assert!(approx(b.y2(), 1.0));
}

#[test]
fn corners_without_rotation_are_axis_aligned() {
    let b = BBox::new(10.0, 20.0, 4.0, 2.0, 0.0);
    let [tl, tr, br, bl] = b.corners();
    assert!(approx(tl.x, 8.0) && approx(tl.y, 19.0));
    assert!(approx(tr.x, 12.0) && approx(tr.y, 19.0));
    assert!(approx(br.x, 12.0) && approx(br.y, 21.0));
    assert!(approx(bl.x, 8.0) && approx(bl.y, 21.0));
}

#[test]
fn positive_angle_rotates_clockwise_in_image_space() {
    // A 90 degree turn moves the top-left corner to the top-right side in y-down space.
    let b = BBox::new(0.0, 0.0, 2.0, 2.0, 90.0);
    let [tl, ..] = b.corners();
    assert!(approx(tl.x, 1.0), "{tl:?}");
    assert!(approx(tl.y, -1.0), "{tl:?}");
}

#[test]
fn json_roundtrips_and_patches_present_keys_only() {
    let b = BBox::new(1.0, 2.0, 3.0, 4.0, 5.0);
    let mut c = BBox::UNSET;
    c.set_json(&b.json()).unwrap();
    assert_eq!(b, c);

    c.set_json(r#"{"cx": 9.0, "unknown": true, "angle": null}"#)
        .unwrap();
    assert_eq!(c, BBox::new(9.0, 2.0, 3.0, 4.0, 5.0));
}

#[test]
fn set_json_rejects_garbage() {
    let mut b = BBox::UNSET;
    assert!(matches!(b.set_json("}{"), Err(TrackError::InvalidJson(_))));
    assert!(matches!(
        b.set_json(r#"{"cx": "left"}"#),
        Err(TrackError::InvalidJson(_))
    ));
    assert!(b.is_unset());
}
