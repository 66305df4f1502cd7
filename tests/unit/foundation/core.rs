use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.iter().count() as u64, r.len_frames());
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_terms() {
    assert!(matches!(Fps::new(30, 0), Err(TrackError::InvalidState(_))));
    assert!(matches!(Fps::new(0, 1), Err(TrackError::InvalidState(_))));
    assert!(Fps { num: 0, den: 1 }.validate().is_err());
}

#[test]
fn fps_frame_duration_matches_rational() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frames_to_secs(30) - 1.001).abs() < 1e-12);
    assert!((fps.as_f64() - 29.97002997).abs() < 1e-6);
}

#[test]
fn fps_parses_ratio_and_integer_forms() {
    assert_eq!("30000/1001".parse::<Fps>().unwrap(), Fps { num: 30000, den: 1001 });
    assert_eq!("25".parse::<Fps>().unwrap(), Fps { num: 25, den: 1 });
    assert!("24/0".parse::<Fps>().is_err());
    assert!("abc".parse::<Fps>().is_err());
}
