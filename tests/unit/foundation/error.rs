use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FbPaintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FbPaintError::device("x")
            .to_string()
            .contains("device error:")
    );
    assert!(
        FbPaintError::image("x")
            .to_string()
            .contains("image error:")
    );
    assert!(
        FbPaintError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        FbPaintError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FbPaintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
