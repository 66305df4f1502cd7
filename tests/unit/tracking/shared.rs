use super::*;

#[test]
fn is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SharedBoxTrack>();
    assert_send_sync::<BoxTrack>();
}

#[test]
fn clones_share_state() {
    let a = SharedBoxTrack::default();
    let b = a.clone();
    a.update(|t| t.add_box(FrameIndex(0), 1.0, 2.0, 3.0, 4.0, 0.0));
    assert_eq!(b.get_box(FrameIndex(0)), BBox::new(1.0, 2.0, 3.0, 4.0, 0.0));
    assert_eq!(b.snapshot().len(), 1);
}

#[test]
fn concurrent_readers_see_the_same_boxes() {
    let mut track = BoxTrack::new();
    track.add_box(FrameIndex(0), 0.0, 0.0, 1.0, 1.0, 0.0);
    track.add_box(FrameIndex(100), 100.0, 50.0, 1.0, 1.0, 0.0);
    let shared = SharedBoxTrack::from(track);
    let expected: Vec<BBox> = (0..100).map(|f| shared.get_box(FrameIndex(f))).collect();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let shared = shared.clone();
            let expected = &expected;
            s.spawn(move || {
                for f in 0..100u64 {
                    assert_eq!(shared.get_box(FrameIndex(f)), expected[f as usize]);
                }
            });
        }
    });
}

#[test]
fn survives_a_panicking_writer() {
    let shared = SharedBoxTrack::default();
    let handle = shared.clone();
    let res = std::thread::spawn(move || {
        let mut track = handle.write();
        track.set_id("before-panic");
        if track.id() == "before-panic" {
            panic!("writer died");
        }
    })
    .join();
    assert!(res.is_err());
    assert_eq!(shared.read().id(), "before-panic");
}
