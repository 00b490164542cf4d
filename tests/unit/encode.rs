use super::*;
use crate::source::cursor::{CURSOR, CURSOR_PALETTE, CURSOR_PIXELS};
use crate::source::decoded::DecodedImage;

#[test]
fn encodes_palette_in_first_seen_order() {
    let img = DecodedImage::from_rgba8(
        3,
        2,
        vec![
            9, 9, 9, 255, 1, 2, 3, 0, 9, 9, 9, 255, //
            1, 2, 3, 0, 4, 5, 6, 7, 9, 9, 9, 255,
        ],
    )
    .unwrap();

    let src = encode_table_image("ICON", &img, "icon.png").unwrap();
    assert!(src.starts_with("// Generated by `fbpaint encode` from icon.png.\n"));
    assert!(src.contains("pub const ICON_PALETTE: [[u8; 4]; 3] = [\n    [9, 9, 9, 255],\n    [1, 2, 3, 0],\n    [4, 5, 6, 7],\n];"));
    assert!(src.contains("pub const ICON_PIXELS: [u8; 6] = [\n    0, 1, 0,\n    1, 2, 0,\n];"));
    assert!(src.contains(
        "pub const ICON: TableImage = TableImage::new(3, 2, &ICON_PALETTE, &ICON_PIXELS);"
    ));
}

#[test]
fn reencoding_cursor_reproduces_its_tables() {
    let src = encode_table_image("CURSOR", &CURSOR, "cursor.png").unwrap();
    assert!(src.contains(&format!("[[u8; 4]; {}]", CURSOR_PALETTE.len())));
    let first_row = CURSOR_PIXELS[..14]
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    assert!(src.contains(&format!("    {first_row},\n")));
}

#[test]
fn rejects_bad_names() {
    let img = DecodedImage::from_rgba8(1, 1, vec![0, 0, 0, 255]).unwrap();
    for bad in ["", "_", "icon", "1ICON", "MY-ICON"] {
        let err = encode_table_image(bad, &img, "x").unwrap_err();
        assert!(matches!(err, FbPaintError::Validation(_)), "{bad}");
    }
    assert!(encode_table_image("_ICON_2", &img, "x").is_ok());
}

#[test]
fn rejects_too_many_colors() {
    let mut data = Vec::new();
    for i in 0..=MAX_PALETTE_LEN {
        data.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 0, 255]);
    }
    let img = DecodedImage::from_rgba8(MAX_PALETTE_LEN + 1, 1, data).unwrap();
    let err = encode_table_image("BIG", &img, "big.png").unwrap_err();
    assert!(matches!(err, FbPaintError::Encode(_)));
}
