use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TrackError::invalid_json("x")
            .to_string()
            .contains("invalid json:")
    );
    assert!(
        TrackError::invalid_state("x")
            .to_string()
            .contains("invalid state:")
    );
    assert!(TrackError::decode("x").to_string().contains("decode error:"));
    assert!(
        TrackError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_names_the_path() {
    let err = TrackError::io(
        "missing/boxes.json",
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    let msg = err.to_string();
    assert!(msg.contains("missing/boxes.json"));
    assert!(msg.contains("gone"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TrackError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
